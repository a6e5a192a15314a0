//! Controller wiring
//!
//! [`Intervalometer`] owns the hardware and sequences the three phases of a
//! session: collect the settings, run the capture, then announce completion
//! until power-off.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use rand_core::RngCore;

use crate::collector::ConfigurationCollector;
use crate::config::CaptureConfig;
use crate::encoder::{EncoderInput, EncoderMenu};
use crate::error::{CollectError, Error, MenuError};
use crate::idle::IdleAnnouncer;
use crate::interface::{Shutter, StatusDisplay};
use crate::menu::MenuToolkit;
use crate::scheduler::{CaptureScheduler, CaptureSession};
use crate::status::StatusReporter;

/// Time-lapse controller
pub struct Intervalometer<P, S, R, D> {
    scheduler: CaptureScheduler<P>,
    reporter: StatusReporter<S, R>,
    delay: D,
    idle: IdleAnnouncer,
}

impl<P, S, R, D> Intervalometer<P, S, R, D>
where
    P: OutputPin,
    S: StatusDisplay,
    R: RngCore,
    D: DelayNs,
{
    /// Assemble a controller from its hardware
    pub fn new(shutter: Shutter<P>, display: S, rng: R, delay: D) -> Self {
        Self {
            scheduler: CaptureScheduler::new(shutter),
            reporter: StatusReporter::new(display, rng),
            delay,
            idle: IdleAnnouncer::new(),
        }
    }

    /// Replace the completion announcer
    #[must_use]
    pub fn with_idle(mut self, idle: IdleAnnouncer) -> Self {
        self.idle = idle;
        self
    }

    /// Collect the settings through any menu toolkit
    ///
    /// `make_menu` builds the toolkit from the controller's display and delay,
    /// so the menu renders where progress will later be reported.
    pub fn configure<'a, M, F>(
        &'a mut self,
        make_menu: F,
    ) -> Result<CaptureConfig, CollectError<M::Error>>
    where
        M: MenuToolkit,
        F: FnOnce(&'a mut S, &'a mut D) -> M,
    {
        let menu = make_menu(self.reporter.display_mut(), &mut self.delay);
        ConfigurationCollector::new(menu).collect()
    }

    /// Collect the settings with the rotary encoder menu on the status display
    pub fn configure_with_encoder<E: EncoderInput>(
        &mut self,
        input: E,
    ) -> Result<CaptureConfig, CollectError<MenuError<E::Error, S::Error>>> {
        self.configure(|display, delay| EncoderMenu::new(input, display, delay))
    }

    /// Show the run summary and take every exposure
    pub fn capture(
        &mut self,
        config: &CaptureConfig,
    ) -> Result<CaptureSession, Error<P::Error, S::Error>> {
        if !config.start_confirmed() {
            log::warn!("Start was not confirmed, capturing anyway");
        }
        self.reporter.announce(config).map_err(Error::Display)?;
        self.scheduler
            .run(config, &mut self.delay, &mut self.reporter)
    }

    /// Announce completion until power-off
    ///
    /// Only returns on a display fault.
    pub fn idle(&mut self) -> Result<Infallible, S::Error> {
        self.idle.run(&mut self.reporter, &mut self.delay)
    }

    /// Configure, capture, then idle
    pub fn run<E: EncoderInput>(
        mut self,
        input: E,
    ) -> Result<Infallible, Error<P::Error, S::Error, E::Error>> {
        let config = self.configure_with_encoder(input)?;
        self.capture(&config).map_err(Error::with_input::<E::Error>)?;
        self.idle().map_err(Error::Display)
    }

    /// Access the scheduler
    pub fn scheduler(&self) -> &CaptureScheduler<P> {
        &self.scheduler
    }

    /// Access the status reporter
    pub fn reporter_mut(&mut self) -> &mut StatusReporter<S, R> {
        &mut self.reporter
    }

    /// Release the hardware
    pub fn into_parts(self) -> (Shutter<P>, StatusReporter<S, R>, D) {
        (self.scheduler.into_inner(), self.reporter, self.delay)
    }
}
