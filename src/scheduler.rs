//! Timed exposure state machine
//!
//! [`CaptureScheduler`] walks `Idle -> Exposing -> InterShotDelay -> Exposing
//! -> ... -> Completed`. Every exposure asserts the trigger line, holds it for
//! the full exposure time with a blocking wait, releases it and reports
//! progress. No delay follows the final exposure.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use intervalometer::{
//!     CaptureConfig, CaptureScheduler, CaptureState, Shutter, StatusDisplay, StatusReporter,
//! };
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
//! let config = CaptureConfig::builder().pic_units(10).exposure_secs(1).build();
//! let mut reporter = StatusReporter::new(MockDisplay, MockRng);
//! let mut scheduler = CaptureScheduler::new(Shutter::new(MockPin));
//!
//! let session = match scheduler.run(&config, &mut MockDelay, &mut reporter) {
//!     Ok(session) => session,
//!     Err(_) => return,
//! };
//! assert_eq!(session.shots_taken(), 100);
//! assert_eq!(scheduler.state(), CaptureState::Completed);
//! ```

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use rand_core::RngCore;

use crate::config::CaptureConfig;
use crate::error::Error;
use crate::interface::{Shutter, StatusDisplay};
use crate::status::StatusReporter;

type CaptureResult<T, P, S> =
    core::result::Result<T, Error<<P as embedded_hal::digital::ErrorType>::Error, <S as StatusDisplay>::Error>>;

/// Scheduler state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// No session yet
    #[default]
    Idle,
    /// Next step opens the shutter
    Exposing,
    /// Next step waits the inter-shot delay
    InterShotDelay,
    /// Every shot has been taken
    Completed,
}

/// Progress of one capture run
///
/// Created from a [`CaptureConfig`] when the run starts. `shots_taken` only
/// ever grows by one per completed exposure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureSession {
    shots_taken: u32,
    target_shots: u32,
    exposure_time: Duration,
    inter_shot_delay: Duration,
}

impl CaptureSession {
    /// Start a session with no shots taken
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            shots_taken: 0,
            target_shots: config.target_shots(),
            exposure_time: config.exposure_time(),
            inter_shot_delay: config.inter_shot_delay(),
        }
    }

    /// Completed exposures so far
    pub fn shots_taken(&self) -> u32 {
        self.shots_taken
    }

    /// Exposures the session takes in total
    pub fn target_shots(&self) -> u32 {
        self.target_shots
    }

    /// Exposures still to take
    pub fn remaining_shots(&self) -> u32 {
        self.target_shots.saturating_sub(self.shots_taken)
    }

    /// How long the trigger line is held per exposure
    pub fn exposure_time(&self) -> Duration {
        self.exposure_time
    }

    /// Wait between two exposures
    pub fn inter_shot_delay(&self) -> Duration {
        self.inter_shot_delay
    }

    /// Whether every shot has been taken
    pub fn is_complete(&self) -> bool {
        self.shots_taken >= self.target_shots
    }

    pub(crate) fn record_shot(&mut self) {
        self.shots_taken += 1;
    }
}

/// Drives the trigger line through a capture session
///
/// The scheduler exclusively owns the trigger line. It runs one session and
/// then stays in [`CaptureState::Completed`].
pub struct CaptureScheduler<P> {
    /// Trigger line
    shutter: Shutter<P>,
    /// Current state
    state: CaptureState,
    /// Session, present once started
    session: Option<CaptureSession>,
}

impl<P: OutputPin> CaptureScheduler<P> {
    /// Create a new idle scheduler
    pub fn new(shutter: Shutter<P>) -> Self {
        Self {
            shutter,
            state: CaptureState::Idle,
            session: None,
        }
    }

    /// Current state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Current session, if one has been started
    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Get a reference to the trigger line
    pub fn shutter(&self) -> &Shutter<P> {
        &self.shutter
    }

    /// Start a session: `Idle -> Exposing`
    ///
    /// The configuration is taken as is; picker bounds are not re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotIdle`] if a session was already started.
    pub fn start<S: StatusDisplay>(&mut self, config: &CaptureConfig) -> CaptureResult<(), P, S> {
        if self.state != CaptureState::Idle {
            return Err(Error::NotIdle(self.state));
        }
        let session = CaptureSession::new(config);
        log::info!(
            "Starting capture: {} shots, {} ms exposure, {} ms delay",
            session.target_shots(),
            session.exposure_time().as_millis(),
            session.inter_shot_delay().as_millis()
        );
        self.session = Some(session);
        self.state = if session.is_complete() {
            CaptureState::Completed
        } else {
            CaptureState::Exposing
        };
        Ok(())
    }

    /// Perform the action of the current state and move to the next one
    ///
    /// `Idle` and `Completed` do nothing. Returns the new state.
    ///
    /// # Errors
    ///
    /// A trigger fault leaves the state at `Exposing` with the shot not
    /// counted; [`shutter`](Self::shutter) tells whether the line is still
    /// asserted. A display fault is reported after the shot was counted and
    /// the state advanced.
    pub fn step<D, S, R>(
        &mut self,
        delay: &mut D,
        reporter: &mut StatusReporter<S, R>,
    ) -> CaptureResult<CaptureState, P, S>
    where
        D: DelayNs,
        S: StatusDisplay,
        R: RngCore,
    {
        let Some(session) = self.session.as_mut() else {
            return Ok(self.state);
        };

        match self.state {
            CaptureState::Idle | CaptureState::Completed => {}
            CaptureState::Exposing => {
                log::info!(
                    "Taking shot {}/{}",
                    session.shots_taken() + 1,
                    session.target_shots()
                );
                self.shutter.assert().map_err(Error::Trigger)?;
                delay.delay_ms(millis(session.exposure_time()));
                self.shutter.release().map_err(Error::Trigger)?;
                session.record_shot();
                self.state = if session.is_complete() {
                    log::info!("Capture complete after {} shots", session.shots_taken());
                    CaptureState::Completed
                } else {
                    CaptureState::InterShotDelay
                };

                // Settle the state before reporting
                reporter.report(session).map_err(Error::Display)?;
            }
            CaptureState::InterShotDelay => {
                log::debug!(
                    "Waiting {} ms before next shot",
                    session.inter_shot_delay().as_millis()
                );
                delay.delay_ms(millis(session.inter_shot_delay()));
                self.state = CaptureState::Exposing;
            }
        }

        Ok(self.state)
    }

    /// Run a whole session to completion
    ///
    /// Starts the session and steps until [`CaptureState::Completed`]. There is
    /// no cancellation once the first exposure begins.
    pub fn run<D, S, R>(
        &mut self,
        config: &CaptureConfig,
        delay: &mut D,
        reporter: &mut StatusReporter<S, R>,
    ) -> CaptureResult<CaptureSession, P, S>
    where
        D: DelayNs,
        S: StatusDisplay,
        R: RngCore,
    {
        self.start::<S>(config)?;
        while self.step(delay, reporter)? != CaptureState::Completed {}
        self.session.ok_or(Error::NotIdle(self.state))
    }

    /// Give the trigger line back
    pub fn into_inner(self) -> Shutter<P> {
        self.shutter
    }
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        BusFault, CountingRng, Event, FlakyPin, Log, PinFault, RecordingDelay, RecordingDisplay,
        RecordingPin, WearingDisplay, new_log, writes,
    };

    type TestScheduler = CaptureScheduler<RecordingPin>;
    type TestReporter = StatusReporter<RecordingDisplay, CountingRng>;

    fn setup() -> (Log, TestScheduler, RecordingDelay, TestReporter) {
        let log = new_log();
        let scheduler = CaptureScheduler::new(Shutter::new(RecordingPin(log.clone())));
        let delay = RecordingDelay(log.clone());
        let reporter = StatusReporter::new(RecordingDisplay(log.clone()), CountingRng::default());
        (log, scheduler, delay, reporter)
    }

    fn count(log: &Log, wanted: &Event) -> usize {
        log.borrow().iter().filter(|event| *event == wanted).count()
    }

    #[test]
    fn test_shot_count_for_default_pic_units() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder().pic_units(20).build();

        let session = scheduler.run(&config, &mut delay, &mut reporter).unwrap();

        assert_eq!(session.shots_taken(), 200);
        assert_eq!(count(&log, &Event::High), 200);
        assert_eq!(count(&log, &Event::Low), 200);
        assert_eq!(writes(&log).len(), 200);
    }

    #[test]
    fn test_exposure_hold_is_exact() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder()
            .pic_units(1)
            .exposure_secs(30)
            .exposure_ms_units(5)
            .build();

        scheduler.start::<RecordingDisplay>(&config).unwrap();
        scheduler.step(&mut delay, &mut reporter).unwrap();

        let events = log.borrow();
        assert_eq!(events[0], Event::High);
        assert_eq!(events[1], Event::DelayMs(30_050));
        assert_eq!(events[2], Event::Low);
    }

    #[test]
    fn test_no_delay_after_final_shot() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder()
            .pic_units(1)
            .exposure_secs(2)
            .delay_secs(5)
            .build();

        scheduler.run(&config, &mut delay, &mut reporter).unwrap();

        assert_eq!(count(&log, &Event::DelayMs(5_000)), 9);
        assert_eq!(count(&log, &Event::DelayMs(2_000)), 10);

        // Last hardware action is the final release, followed only by the report
        let events = log.borrow();
        let last_delay = events
            .iter()
            .rposition(|event| matches!(event, Event::DelayMs(_)))
            .unwrap();
        assert_eq!(events[last_delay], Event::DelayMs(2_000));
        assert_eq!(events[last_delay + 1], Event::Low);
        assert!(matches!(events[last_delay + 2], Event::Write { .. }));
        assert_eq!(events.len(), last_delay + 3);
    }

    #[test]
    fn test_state_transitions_and_monotonic_progress() {
        let (_log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder().pic_units(1).build();
        assert_eq!(scheduler.state(), CaptureState::Idle);

        scheduler.start::<RecordingDisplay>(&config).unwrap();
        assert_eq!(scheduler.state(), CaptureState::Exposing);

        let mut previous = 0;
        let mut completions = 0;
        loop {
            let state = scheduler.step(&mut delay, &mut reporter).unwrap();
            let taken = scheduler.session().unwrap().shots_taken();
            assert!(taken >= previous);
            previous = taken;
            match state {
                CaptureState::InterShotDelay => assert!(taken < 10),
                CaptureState::Exposing => {}
                CaptureState::Completed => {
                    completions += 1;
                    break;
                }
                CaptureState::Idle => unreachable!(),
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(previous, 10);

        // Completed is terminal
        assert_eq!(
            scheduler.step(&mut delay, &mut reporter).unwrap(),
            CaptureState::Completed
        );
        assert_eq!(scheduler.session().unwrap().shots_taken(), 10);
    }

    #[test]
    fn test_end_to_end_blocking_time() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder()
            .pic_units(1)
            .exposure_secs(1)
            .exposure_ms_units(0)
            .delay_secs(1)
            .build();

        let session = scheduler.run(&config, &mut delay, &mut reporter).unwrap();

        assert_eq!(session.shots_taken(), 10);
        assert_eq!(scheduler.state(), CaptureState::Completed);
        assert_eq!(RecordingDelay::total_ms(&log), 19_000);
        assert!(!scheduler.shutter().is_asserted());
    }

    #[test]
    fn test_reports_follow_each_shot() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        let config = CaptureConfig::builder()
            .pic_units(1)
            .exposure_secs(1)
            .delay_secs(1)
            .build();

        scheduler.run(&config, &mut delay, &mut reporter).unwrap();

        let texts: alloc::vec::Vec<_> = writes(&log).into_iter().map(|(text, _, _)| text).collect();
        assert_eq!(texts.first().map(alloc::string::String::as_str), Some("1/10 0mins"));
        assert_eq!(texts.last().map(alloc::string::String::as_str), Some("10/10 0mins"));
        assert_eq!(texts.len(), 10);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (_log, mut scheduler, _delay, _reporter) = setup();
        let config = CaptureConfig::default();
        scheduler.start::<RecordingDisplay>(&config).unwrap();
        let result = scheduler.start::<RecordingDisplay>(&config);
        assert!(matches!(result, Err(Error::NotIdle(CaptureState::Exposing))));
    }

    #[test]
    fn test_idle_step_does_nothing() {
        let (log, mut scheduler, mut delay, mut reporter) = setup();
        assert_eq!(
            scheduler.step(&mut delay, &mut reporter).unwrap(),
            CaptureState::Idle
        );
        assert!(log.borrow().is_empty());
    }

    fn ten_shot_config() -> CaptureConfig {
        CaptureConfig::builder()
            .pic_units(1)
            .exposure_secs(1)
            .delay_secs(1)
            .build()
    }

    #[test]
    fn test_report_failure_on_last_shot_completes() {
        let log = new_log();
        let mut scheduler = CaptureScheduler::new(Shutter::new(RecordingPin(log.clone())));
        let mut delay = RecordingDelay(log.clone());
        let display = WearingDisplay {
            inner: RecordingDisplay(log.clone()),
            remaining: 9,
        };
        let mut reporter = StatusReporter::new(display, CountingRng::default());

        let result = scheduler.run(&ten_shot_config(), &mut delay, &mut reporter);
        assert!(matches!(result, Err(Error::Display(BusFault))));
        assert_eq!(scheduler.state(), CaptureState::Completed);

        // Stepping again must not fire an eleventh shot
        assert_eq!(
            scheduler.step(&mut delay, &mut reporter).unwrap(),
            CaptureState::Completed
        );
        assert_eq!(scheduler.session().unwrap().shots_taken(), 10);
        assert_eq!(count(&log, &Event::High), 10);
    }

    #[test]
    fn test_report_failure_mid_session_moves_to_delay() {
        let log = new_log();
        let mut scheduler = CaptureScheduler::new(Shutter::new(RecordingPin(log.clone())));
        let mut delay = RecordingDelay(log.clone());
        let display = WearingDisplay {
            inner: RecordingDisplay(log.clone()),
            remaining: 0,
        };
        let mut reporter = StatusReporter::new(display, CountingRng::default());

        scheduler.start::<WearingDisplay>(&ten_shot_config()).unwrap();
        let result = scheduler.step(&mut delay, &mut reporter);
        assert!(matches!(result, Err(Error::Display(BusFault))));
        assert_eq!(scheduler.state(), CaptureState::InterShotDelay);
        assert_eq!(scheduler.session().unwrap().shots_taken(), 1);
    }

    #[test]
    fn test_assert_failure_propagates_without_counting() {
        let log = new_log();
        let pin = FlakyPin {
            log: log.clone(),
            fail_high: true,
            fail_low: false,
        };
        let mut scheduler = CaptureScheduler::new(Shutter::new(pin));
        let mut delay = RecordingDelay(log.clone());
        let mut reporter = StatusReporter::new(RecordingDisplay(log.clone()), CountingRng::default());

        let result = scheduler.run(&ten_shot_config(), &mut delay, &mut reporter);
        assert!(matches!(result, Err(Error::Trigger(PinFault))));
        assert_eq!(scheduler.state(), CaptureState::Exposing);
        assert_eq!(scheduler.session().unwrap().shots_taken(), 0);
        assert!(!scheduler.shutter().is_asserted());
        // No hold, no report
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_release_failure_leaves_line_asserted() {
        let log = new_log();
        let pin = FlakyPin {
            log: log.clone(),
            fail_high: false,
            fail_low: true,
        };
        let mut scheduler = CaptureScheduler::new(Shutter::new(pin));
        let mut delay = RecordingDelay(log.clone());
        let mut reporter = StatusReporter::new(RecordingDisplay(log.clone()), CountingRng::default());

        let result = scheduler.run(&ten_shot_config(), &mut delay, &mut reporter);
        assert!(matches!(result, Err(Error::Trigger(PinFault))));
        assert_eq!(scheduler.state(), CaptureState::Exposing);
        assert_eq!(scheduler.session().unwrap().shots_taken(), 0);
        assert!(scheduler.shutter().is_asserted());
        assert_eq!(*log.borrow(), [Event::High, Event::DelayMs(1_000)]);
        assert!(writes(&log).is_empty());
    }
}
