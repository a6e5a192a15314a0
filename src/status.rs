//! Progress reporting with burn-in mitigation
//!
//! Over a long unattended run a fixed status line would wear the same pixels
//! of an OLED panel. [`StatusReporter`] therefore draws every update at a
//! random pixel row in `0..ROW_SPAN` and always clears the second line.

use core::fmt::Write;

use rand_core::RngCore;

use crate::config::CaptureConfig;
use crate::interface::StatusDisplay;
use crate::scheduler::CaptureSession;

/// Number of pixel rows a status line may start on
pub const ROW_SPAN: u8 = 52;

/// Fixed-capacity text line
pub type StatusLine = heapless::String<32>;

const MS_PER_MINUTE: u64 = 60_000;

/// Formats progress and places it on the display
///
/// ## Type Parameters
///
/// * `S` - Display implementing [`StatusDisplay`]
/// * `R` - Random source implementing [`RngCore`]; quality does not matter
pub struct StatusReporter<S, R> {
    /// Shared display
    display: S,
    /// Source of row placement bytes
    rng: R,
}

impl<S, R> StatusReporter<S, R>
where
    S: StatusDisplay,
    R: RngCore,
{
    /// Create a new StatusReporter
    pub fn new(display: S, rng: R) -> Self {
        Self { display, rng }
    }

    /// Show `"{taken}/{target} {minutes}mins"` at a random row
    pub fn report(&mut self, session: &CaptureSession) -> Result<(), S::Error> {
        let line = progress_line(session);
        self.write_at_random_row(&line)
    }

    /// Show one line of text at a random row, clearing the second line
    pub fn write_at_random_row(&mut self, text: &str) -> Result<(), S::Error> {
        let row = self.random_row();
        self.display.write(text, "", row)
    }

    /// Show the run summary at the top of the display
    pub fn announce(&mut self, config: &CaptureConfig) -> Result<(), S::Error> {
        let (line1, line2) = summary_lines(config);
        self.display.write(&line1, &line2, 0)
    }

    /// Pick a row in `0..ROW_SPAN` from one random byte
    pub fn random_row(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.rng.fill_bytes(&mut byte);
        byte[0] % ROW_SPAN
    }

    /// Get a mutable reference to the display
    ///
    /// The menu borrows the display through this while collecting settings.
    pub fn display_mut(&mut self) -> &mut S {
        &mut self.display
    }

    /// Give the display and random source back
    pub fn into_parts(self) -> (S, R) {
        (self.display, self.rng)
    }
}

/// Minutes left in the session, rounded half to even
///
/// Computed as `(target - taken) * (exposure + delay) / 60` in exact
/// milliseconds.
pub fn remaining_minutes(session: &CaptureSession) -> u64 {
    let per_shot = session.exposure_time() + session.inter_shot_delay();
    let total_ms = u64::from(session.remaining_shots()) * per_shot.as_millis() as u64;
    round_half_even(total_ms, MS_PER_MINUTE)
}

fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Format the progress line for a session
pub fn progress_line(session: &CaptureSession) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = write!(
        line,
        "{}/{} {}mins",
        session.shots_taken(),
        session.target_shots(),
        remaining_minutes(session)
    );
    line
}

/// Format the two summary lines shown before the first exposure
///
/// The exposure prints with one decimal, or two when hundredths are set:
/// `"200 at 30.0s"`, `"200 at 30.05s"`.
pub fn summary_lines(config: &CaptureConfig) -> (StatusLine, StatusLine) {
    let exposure_ms = config.exposure_time().as_millis();
    let whole = exposure_ms / 1000;
    let hundredths = (exposure_ms % 1000) / 10;

    let mut line1 = StatusLine::new();
    if hundredths % 10 == 0 {
        let _ = write!(
            line1,
            "{} at {}.{}s",
            config.target_shots(),
            whole,
            hundredths / 10
        );
    } else {
        let _ = write!(
            line1,
            "{} at {}.{:02}s",
            config.target_shots(),
            whole,
            hundredths
        );
    }

    let mut line2 = StatusLine::new();
    let _ = write!(line2, "Delay: {}", config.delay_secs());

    (line1, line2)
}
