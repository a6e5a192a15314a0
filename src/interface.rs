//! Hardware interface abstraction
//!
//! This module provides the [`StatusDisplay`] trait for the shared text display
//! and the [`Shutter`] struct driving the camera's remote-shutter input.
//!
//! ## Hardware Requirements
//!
//! - 1 GPIO output wired (usually through an opto-coupler) to the camera's
//!   remote-shutter input
//! - A small display able to show two lines of text at a chosen pixel row
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use intervalometer::Shutter;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut shutter = Shutter::new(MockPin);
//!
//! let _ = shutter.assert();
//! assert!(shutter.is_asserted());
//!
//! let _ = shutter.release();
//! assert!(!shutter.is_asserted());
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

/// Trait for the display the controller reports on
///
/// The display is shared by the menu, the status reporter and the idle
/// announcer. Every write replaces the visible content.
///
/// ## Implementing
///
/// With the `graphics` feature, [`TextDisplay`](crate::TextDisplay) implements
/// this trait for any monochrome embedded-graphics draw target. Implement it
/// yourself for character LCDs or other text-only devices.
pub trait StatusDisplay {
    /// Error type for display writes
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Replace the visible content with two lines of text
    ///
    /// # Arguments
    ///
    /// * `line1` - First line, drawn at `row_start`
    /// * `line2` - Second line, drawn one text line below
    /// * `row_start` - Pixel row of the top of the first line
    fn write(&mut self, line1: &str, line2: &str, row_start: u8) -> Result<(), Self::Error>;
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for &mut T {
    type Error = T::Error;

    fn write(&mut self, line1: &str, line2: &str, row_start: u8) -> Result<(), Self::Error> {
        (**self).write(line1, line2, row_start)
    }
}

/// Trigger line driving the camera's remote-shutter input
///
/// No acknowledgement is expected from the camera: asserting and releasing
/// only drive the pin.
///
/// ## Type Parameters
///
/// * `P` - Output pin implementing [`OutputPin`]
pub struct Shutter<P> {
    /// Pin wired to the remote-shutter input
    pin: P,
    /// Pin level that opens the shutter (true = high)
    active_high: bool,
    /// Whether the line is currently asserted
    asserted: bool,
}

impl<P: OutputPin> Shutter<P> {
    /// Create a new active-high Shutter
    ///
    /// The pin is not touched until the first [`assert`](Self::assert) or
    /// [`release`](Self::release).
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_high: true,
            asserted: false,
        }
    }

    /// Set trigger polarity
    ///
    /// Default is active-high. Set to false when the line pulls the camera
    /// input low directly.
    pub fn set_active_high(&mut self, active_high: bool) -> &mut Self {
        self.active_high = active_high;
        self
    }

    /// Get trigger polarity (true = active high)
    pub fn active_high(&self) -> bool {
        self.active_high
    }

    /// Whether the line is currently asserted
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Open the shutter
    ///
    /// # Errors
    ///
    /// Returns the pin error if the line could not be driven.
    pub fn assert(&mut self) -> Result<(), P::Error> {
        if self.active_high {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.asserted = true;
        Ok(())
    }

    /// Close the shutter
    ///
    /// # Errors
    ///
    /// Returns the pin error if the line could not be driven.
    pub fn release(&mut self) -> Result<(), P::Error> {
        if self.active_high {
            self.pin.set_low()?;
        } else {
            self.pin.set_high()?;
        }
        self.asserted = false;
        Ok(())
    }

    /// Give the pin back
    pub fn into_inner(self) -> P {
        self.pin
    }
}
