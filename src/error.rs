//! Error types for the controller
//!
//! This module defines error types for configuration checks ([`ConfigError`]),
//! menu runs ([`MenuError`], [`CollectError`]) and capture runs ([`Error`]).
//!
//! ## Error Types
//!
//! - [`ConfigError`] - A collected value lies outside its picker bounds
//! - [`MenuError`] - The encoder or display failed while the menu was running
//! - [`CollectError`] - Configuration collection failed
//! - [`Error`] - Runtime errors while capturing or idling
//!
//! ## Example
//!
//! ```
//! use intervalometer::{CaptureConfig, ConfigError};
//!
//! let config = CaptureConfig::builder().delay_secs(0).build();
//! assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { .. })));
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use crate::config::FieldId;
use crate::scheduler::CaptureState;

/// Errors that can occur while capturing, announcing or wiring the phases
///
/// Generic over the trigger line error `T`, the display error `S` and the
/// encoder input error `I`, so callers can match on the underlying hardware
/// error. Capture alone never reads the encoder and leaves `I` as
/// [`Infallible`].
#[derive(Debug)]
pub enum Error<T, S, I = Infallible> {
    /// Trigger line (GPIO) error
    Trigger(T),
    /// Display write error
    Display(S),
    /// Encoder input error
    Input(I),
    /// A collected value was outside its picker bounds
    Config(ConfigError),
    /// A session was started while the scheduler was not idle
    NotIdle(CaptureState),
    /// The menu was declared with more entries than it can hold
    Capacity {
        /// Maximum number of entries
        max: usize,
    },
}

impl<T, S> Error<T, S, Infallible> {
    /// Re-type a capture error for a caller that also reads encoder input
    pub fn with_input<I>(self) -> Error<T, S, I> {
        match self {
            Self::Trigger(e) => Error::Trigger(e),
            Self::Display(e) => Error::Display(e),
            Self::Input(never) => match never {},
            Self::Config(e) => Error::Config(e),
            Self::NotIdle(state) => Error::NotIdle(state),
            Self::Capacity { max } => Error::Capacity { max },
        }
    }
}

impl<T: Debug, S: Debug, I: Debug> core::fmt::Display for Error<T, S, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Trigger(e) => write!(f, "Trigger line error: {e:?}"),
            Self::Display(e) => write!(f, "Display error: {e:?}"),
            Self::Input(e) => write!(f, "Encoder input error: {e:?}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::NotIdle(state) => write!(f, "Scheduler busy: {state:?}"),
            Self::Capacity { max } => write!(f, "Too many menu entries (max {max})"),
        }
    }
}

impl<T: Debug, S: Debug, I: Debug> core::error::Error for Error<T, S, I> {}

/// A value that its picker could never have produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Value outside `low..=high`
    OutOfRange {
        /// Offending field
        field: FieldId,
        /// Value found
        value: u16,
        /// Smallest allowed value
        low: u16,
        /// Largest allowed value
        high: u16,
    },
    /// Value not on the `low + k * increment` grid
    Misaligned {
        /// Offending field
        field: FieldId,
        /// Value found
        value: u16,
        /// Picker step
        increment: u16,
    },
    /// A field was read back with the wrong kind of value
    WrongKind {
        /// Offending field
        field: FieldId,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                low,
                high,
            } => write!(f, "{field:?} = {value} outside {low}..={high}"),
            Self::Misaligned {
                field,
                value,
                increment,
            } => write!(f, "{field:?} = {value} is not a step of {increment}"),
            Self::WrongKind { field } => write!(f, "{field:?} holds the wrong kind of value"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Errors raised by the encoder menu
#[derive(Debug)]
pub enum MenuError<I, S> {
    /// Reading the encoder failed
    Input(I),
    /// Rendering the menu failed
    Display(S),
    /// A wizard or the root menu was given more entries than it can hold
    Capacity {
        /// Maximum number of entries
        max: usize,
    },
}

impl<I: Debug, S: Debug> core::fmt::Display for MenuError<I, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Encoder input error: {e:?}"),
            Self::Display(e) => write!(f, "Display error: {e:?}"),
            Self::Capacity { max } => write!(f, "Too many menu entries (max {max})"),
        }
    }
}

impl<I: Debug, S: Debug> core::error::Error for MenuError<I, S> {}

/// Errors raised while collecting a [`CaptureConfig`](crate::CaptureConfig)
#[derive(Debug)]
pub enum CollectError<M> {
    /// The menu toolkit failed
    Menu(M),
    /// The menu returned a value outside its picker bounds
    Config(ConfigError),
}

impl<M> From<ConfigError> for CollectError<M> {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl<M: Debug> core::fmt::Display for CollectError<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Menu(e) => write!(f, "Menu error: {e:?}"),
            Self::Config(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl<M: Debug> core::error::Error for CollectError<M> {}

impl<T, S, I> From<CollectError<MenuError<I, S>>> for Error<T, S, I> {
    fn from(e: CollectError<MenuError<I, S>>) -> Self {
        match e {
            CollectError::Menu(MenuError::Input(e)) => Self::Input(e),
            CollectError::Menu(MenuError::Display(e)) => Self::Display(e),
            CollectError::Menu(MenuError::Capacity { max }) => Self::Capacity { max },
            CollectError::Config(e) => Self::Config(e),
        }
    }
}
