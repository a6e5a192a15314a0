//! Terminal "done" loop
//!
//! Once capture completes the controller keeps confirming completion until it
//! is power-cycled, moving the text around to spare the panel.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use rand_core::RngCore;

use crate::interface::StatusDisplay;
use crate::status::StatusReporter;

/// Text shown after the last exposure
pub const DONE_TEXT: &str = "Done!";

/// Default pause between two announcements
pub const DEFAULT_IDLE_INTERVAL_MS: u32 = 10_000;

/// Announces completion forever
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleAnnouncer {
    interval_ms: u32,
}

impl Default for IdleAnnouncer {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_IDLE_INTERVAL_MS,
        }
    }
}

impl IdleAnnouncer {
    /// Create an announcer with the default 10 s interval
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause between two announcements
    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Pause between two announcements
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Show [`DONE_TEXT`] at a random row, wait, repeat
    ///
    /// Never returns `Ok`. The only way out is a display fault.
    pub fn run<D, S, R>(
        &self,
        reporter: &mut StatusReporter<S, R>,
        delay: &mut D,
    ) -> Result<Infallible, S::Error>
    where
        D: DelayNs,
        S: StatusDisplay,
        R: RngCore,
    {
        log::info!("Capture finished, announcing completion");
        loop {
            reporter.write_at_random_row(DONE_TEXT)?;
            delay.delay_ms(self.interval_ms);
        }
    }
}
