//! Time-Lapse Camera Intervalometer
//!
//! A controller that takes a fixed number of timed exposures by driving a
//! camera's remote-shutter line, reporting progress on a small display.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Rotary encoder settings menu, or any custom [`MenuToolkit`]
//! - Millisecond-exact exposure and delay timing
//! - Status text placed at a random row to spread panel wear
//! - `embedded-graphics` text rendering (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use intervalometer::{EncoderInput, Input, Intervalometer, Shutter, StatusDisplay};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # struct MockDisplay;
//! # impl StatusDisplay for MockDisplay {
//! #     type Error = Infallible;
//! #     fn write(&mut self, _: &str, _: &str, _: u8) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockEncoder;
//! # impl EncoderInput for MockEncoder {
//! #     type Error = Infallible;
//! #     fn poll(&mut self) -> Result<Option<Input>, Self::Error> { Ok(Some(Input::Press)) }
//! # }
//! # struct MockRng;
//! # impl rand_core::RngCore for MockRng {
//! #     fn next_u32(&mut self) -> u32 { 0 }
//! #     fn next_u64(&mut self) -> u64 { 0 }
//! #     fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0) }
//! #     fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
//! #         dest.fill(0);
//! #         Ok(())
//! #     }
//! # }
//! let mut shutter = Shutter::new(MockPin);
//! shutter.set_active_high(true);
//!
//! let controller = Intervalometer::new(shutter, MockDisplay, MockRng, MockDelay);
//!
//! // Only comes back on a hardware fault
//! if let Err(err) = controller.run(MockEncoder) {
//!     let _ = err;
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(test)]
mod testing;

/// Controller wiring the phases together
pub mod app;
/// Settings menu layout and validation
pub mod collector;
/// Capture configuration types and builder
pub mod config;
/// Rotary encoder menu toolkit
pub mod encoder;
/// Error types for the controller
pub mod error;
/// Completion announcement loop
pub mod idle;
/// Hardware interface abstraction
pub mod interface;
/// Menu toolkit interface
pub mod menu;
/// Numeric pickers, selection lists and wizards
pub mod picker;
/// Timed exposure state machine
pub mod scheduler;
/// Progress reporting
pub mod status;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use app::Intervalometer;
pub use collector::{ConfigurationCollector, SETTINGS_LABEL, START_LABEL};
pub use config::{
    Builder, CaptureConfig, DELAY_SECS, EXPOSURE_MS_UNITS, EXPOSURE_SECS, FieldId, IntegerField,
    PIC_UNITS, START_NO, START_OPTIONS, START_YES,
};
pub use encoder::{DEFAULT_POLL_INTERVAL_MS, EncoderInput, EncoderMenu, RootMenu};
pub use error::{CollectError, ConfigError, Error, MenuError};
pub use idle::{DEFAULT_IDLE_INTERVAL_MS, DONE_TEXT, IdleAnnouncer};
pub use interface::{Shutter, StatusDisplay};
pub use menu::{FieldValue, FieldValues, Input, MenuToolkit, Step, StepStatus};
pub use picker::{ChoicePicker, FieldPicker, IntegerPicker, Picker, Wizard};
pub use scheduler::{CaptureScheduler, CaptureSession, CaptureState};
pub use status::{ROW_SPAN, StatusReporter};

#[cfg(feature = "graphics")]
pub use graphics::TextDisplay;
