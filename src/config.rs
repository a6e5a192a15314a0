//! Capture configuration types and builder
//!
//! A [`CaptureConfig`] is produced once, before the first exposure, and is never
//! mutated afterwards. The [`IntegerField`] constants describe the bounds, step
//! and default of every numeric parameter the operator can pick.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use intervalometer::CaptureConfig;
//!
//! let config = CaptureConfig::builder()
//!     .pic_units(20)
//!     .exposure_secs(30)
//!     .exposure_ms_units(5)
//!     .build();
//!
//! assert_eq!(config.target_shots(), 200);
//! assert_eq!(config.exposure_time(), Duration::from_millis(30_050));
//!
//! // The milliseconds picker only offers multiples of 10
//! assert!(config.validate().is_err());
//! ```

use core::time::Duration;

pub use crate::error::ConfigError;

/// Each picture unit stands for this many shots
pub const SHOTS_PER_PIC_UNIT: u32 = 10;

/// Each exposure millisecond unit stands for this many milliseconds
pub const MS_PER_EXPOSURE_UNIT: u64 = 10;

/// Identity of a value collected from the operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    /// Number of pictures, in units of [`SHOTS_PER_PIC_UNIT`]
    PicUnits,
    /// Whole seconds of exposure
    ExposureSecs,
    /// Additional exposure, in units of [`MS_PER_EXPOSURE_UNIT`] milliseconds
    ExposureMsUnits,
    /// Seconds between releasing the shutter and the next exposure
    DelaySecs,
    /// Answer to the "Start" question
    StartConfirmed,
}

impl FieldId {
    /// Number of distinct fields
    pub const COUNT: usize = 5;

    /// Every field in collection order
    pub const ALL: [FieldId; Self::COUNT] = [
        FieldId::PicUnits,
        FieldId::ExposureSecs,
        FieldId::ExposureMsUnits,
        FieldId::DelaySecs,
        FieldId::StartConfirmed,
    ];

    /// Position of the field inside [`FieldId::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::PicUnits => 0,
            Self::ExposureSecs => 1,
            Self::ExposureMsUnits => 2,
            Self::DelaySecs => 3,
            Self::StartConfirmed => 4,
        }
    }
}

/// Bounds, step, default and caption of a numeric picker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerField {
    /// Field this picker fills in
    pub field: FieldId,
    /// Smallest selectable value
    pub low: u16,
    /// Largest selectable value
    pub high: u16,
    /// Distance between two selectable values
    pub increment: u16,
    /// Value shown before the operator touches the picker
    pub default: u16,
    /// Caption rendered above the value
    pub caption: &'static str,
}

impl IntegerField {
    /// Check a value against the bounds and the step grid
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] when `value` is outside `low..=high`
    /// and [`ConfigError::Misaligned`] when it is not `low + k * increment`.
    pub fn check(&self, value: u16) -> Result<(), ConfigError> {
        if value < self.low || value > self.high {
            return Err(ConfigError::OutOfRange {
                field: self.field,
                value,
                low: self.low,
                high: self.high,
            });
        }
        if self.increment > 1 && (value - self.low) % self.increment != 0 {
            return Err(ConfigError::Misaligned {
                field: self.field,
                value,
                increment: self.increment,
            });
        }
        Ok(())
    }
}

/// Number of pictures picker: 10..=1000 in steps of 10, default 20
pub const PIC_UNITS: IntegerField = IntegerField {
    field: FieldId::PicUnits,
    low: 10,
    high: 1000,
    increment: 10,
    default: 20,
    caption: "Num Pictures",
};

/// Exposure seconds picker: 0..=90, default 30
pub const EXPOSURE_SECS: IntegerField = IntegerField {
    field: FieldId::ExposureSecs,
    low: 0,
    high: 90,
    increment: 1,
    default: 30,
    caption: "Exposure Secs",
};

/// Exposure milliseconds picker: 0..=990 in steps of 10, default 0
pub const EXPOSURE_MS_UNITS: IntegerField = IntegerField {
    field: FieldId::ExposureMsUnits,
    low: 0,
    high: 990,
    increment: 10,
    default: 0,
    caption: "Exposure Ms",
};

/// Delay between pictures picker: 1..=60, default 1
pub const DELAY_SECS: IntegerField = IntegerField {
    field: FieldId::DelaySecs,
    low: 1,
    high: 60,
    increment: 1,
    default: 1,
    caption: "Pic Delay",
};

/// Affirmative start answer
pub const START_YES: &str = "Yes";

/// Negative start answer, selected by default
pub const START_NO: &str = "No";

/// Options offered by the start question, in display order
pub const START_OPTIONS: [&str; 2] = [START_YES, START_NO];

/// Immutable parameters of a capture session
///
/// Use [`CaptureConfig::builder`] to create one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    pic_units: u16,
    exposure_secs: u16,
    exposure_ms_units: u16,
    delay_secs: u16,
    start_confirmed: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl CaptureConfig {
    /// Start building a configuration from the picker defaults
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Raw picture units as picked
    pub fn pic_units(&self) -> u16 {
        self.pic_units
    }

    /// Whole exposure seconds as picked
    pub fn exposure_secs(&self) -> u16 {
        self.exposure_secs
    }

    /// Raw exposure millisecond units as picked
    pub fn exposure_ms_units(&self) -> u16 {
        self.exposure_ms_units
    }

    /// Delay between pictures, in seconds
    pub fn delay_secs(&self) -> u16 {
        self.delay_secs
    }

    /// Whether the operator answered "Yes" to the start question
    pub fn start_confirmed(&self) -> bool {
        self.start_confirmed
    }

    /// Number of exposures the session takes
    pub fn target_shots(&self) -> u32 {
        u32::from(self.pic_units) * SHOTS_PER_PIC_UNIT
    }

    /// How long the trigger line is held for every exposure
    pub fn exposure_time(&self) -> Duration {
        Duration::from_secs(u64::from(self.exposure_secs))
            + Duration::from_millis(u64::from(self.exposure_ms_units) * MS_PER_EXPOSURE_UNIT)
    }

    /// Wait between releasing the trigger and the next exposure
    pub fn inter_shot_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.delay_secs))
    }

    /// Check every numeric field against its picker bounds
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in collection order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PIC_UNITS.check(self.pic_units)?;
        EXPOSURE_SECS.check(self.exposure_secs)?;
        EXPOSURE_MS_UNITS.check(self.exposure_ms_units)?;
        DELAY_SECS.check(self.delay_secs)
    }
}

/// Builder for [`CaptureConfig`]
///
/// Starts from the picker defaults. Building never fails; call
/// [`CaptureConfig::validate`] to check the result against the picker bounds.
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Builder {
    pic_units: u16,
    exposure_secs: u16,
    exposure_ms_units: u16,
    delay_secs: u16,
    start_confirmed: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            pic_units: PIC_UNITS.default,
            exposure_secs: EXPOSURE_SECS.default,
            exposure_ms_units: EXPOSURE_MS_UNITS.default,
            delay_secs: DELAY_SECS.default,
            start_confirmed: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of picture units
    pub fn pic_units(mut self, value: u16) -> Self {
        self.pic_units = value;
        self
    }

    /// Set whole exposure seconds
    pub fn exposure_secs(mut self, value: u16) -> Self {
        self.exposure_secs = value;
        self
    }

    /// Set exposure millisecond units
    pub fn exposure_ms_units(mut self, value: u16) -> Self {
        self.exposure_ms_units = value;
        self
    }

    /// Set the delay between pictures in seconds
    pub fn delay_secs(mut self, value: u16) -> Self {
        self.delay_secs = value;
        self
    }

    /// Record the answer to the start question
    pub fn start_confirmed(mut self, value: bool) -> Self {
        self.start_confirmed = value;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CaptureConfig {
        CaptureConfig {
            pic_units: self.pic_units,
            exposure_secs: self.exposure_secs,
            exposure_ms_units: self.exposure_ms_units,
            delay_secs: self.delay_secs,
            start_confirmed: self.start_confirmed,
        }
    }
}
