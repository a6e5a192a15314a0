//! Configuration collection
//!
//! [`ConfigurationCollector`] lays out the settings menu on any
//! [`MenuToolkit`], blocks until the operator leaves it and turns the
//! committed values into a validated [`CaptureConfig`].
//!
//! The menu has two entries. "Change Settings" walks through the four numeric
//! pickers, "Start" asks for confirmation and closes the menu.

use crate::config::{
    CaptureConfig, DELAY_SECS, EXPOSURE_MS_UNITS, EXPOSURE_SECS, FieldId, IntegerField,
    PIC_UNITS, START_NO, START_OPTIONS, START_YES,
};
use crate::error::{CollectError, ConfigError};
use crate::menu::{FieldValue, FieldValues, MenuToolkit};

/// Label of the settings entry
pub const SETTINGS_LABEL: &str = "> Change Settings";

/// Label of the start entry
pub const START_LABEL: &str = "> Start";

/// Collects a [`CaptureConfig`] from the operator
pub struct ConfigurationCollector<M> {
    menu: M,
}

impl<M: MenuToolkit> ConfigurationCollector<M> {
    /// Create a collector on top of `menu`
    pub fn new(menu: M) -> Self {
        Self { menu }
    }

    /// Present the menu and block until the operator starts the capture
    ///
    /// Fields never confirmed keep their defaults.
    pub fn collect(&mut self) -> Result<CaptureConfig, CollectError<M::Error>> {
        let menu = &mut self.menu;

        let pic_units = menu.integer_field(PIC_UNITS);
        let exposure_secs = menu.integer_field(EXPOSURE_SECS);
        let exposure_ms = menu.integer_field(EXPOSURE_MS_UNITS);
        let delay_secs = menu.integer_field(DELAY_SECS);
        let start = menu.choice_field(FieldId::StartConfirmed, &START_OPTIONS, START_NO);

        let settings = menu
            .wizard([
                ("Number Pictures", pic_units),
                ("Exposure Seconds", exposure_secs),
                ("Exposure millis", exposure_ms),
                ("Delay Btw Pictures", delay_secs),
            ])
            .map_err(CollectError::Menu)?;
        let start = menu
            .wizard([("Start", start)])
            .map_err(CollectError::Menu)?;
        let mut root = menu
            .build_menu([(SETTINGS_LABEL, settings), (START_LABEL, start)])
            .map_err(CollectError::Menu)?;

        menu.run(&mut root).map_err(CollectError::Menu)?;

        let config = config_from_values(&menu.read_all_fields())?;
        log::info!(
            "Collected {} pictures, exposure {}ms, delay {}s, start {}",
            config.target_shots(),
            config.exposure_time().as_millis(),
            config.delay_secs(),
            config.start_confirmed()
        );
        Ok(config)
    }

    /// Borrow the underlying toolkit
    pub fn menu(&self) -> &M {
        &self.menu
    }

    /// Release the underlying toolkit
    pub fn into_inner(self) -> M {
        self.menu
    }
}

/// Build a validated configuration from committed menu values
///
/// Missing fields fall back to their defaults.
pub fn config_from_values(values: &FieldValues) -> Result<CaptureConfig, ConfigError> {
    let start_confirmed = match values.get(FieldId::StartConfirmed) {
        None => false,
        Some(FieldValue::Choice(option)) => option == START_YES,
        Some(FieldValue::Integer(_)) => {
            return Err(ConfigError::WrongKind {
                field: FieldId::StartConfirmed,
            });
        }
    };

    let config = CaptureConfig::builder()
        .pic_units(integer(values, PIC_UNITS)?)
        .exposure_secs(integer(values, EXPOSURE_SECS)?)
        .exposure_ms_units(integer(values, EXPOSURE_MS_UNITS)?)
        .delay_secs(integer(values, DELAY_SECS)?)
        .start_confirmed(start_confirmed)
        .build();
    config.validate()?;
    Ok(config)
}

fn integer(values: &FieldValues, picker: IntegerField) -> Result<u16, ConfigError> {
    match values.get(picker.field) {
        None => Ok(picker.default),
        Some(FieldValue::Integer(value)) => Ok(value),
        Some(FieldValue::Choice(_)) => Err(ConfigError::WrongKind { field: picker.field }),
    }
}
