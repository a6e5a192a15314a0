//! Shared mocks for unit tests

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use rand_core::RngCore;

use crate::encoder::EncoderInput;
use crate::interface::StatusDisplay;
use crate::menu::Input;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    High,
    Low,
    DelayMs(u32),
    DelayNs(u32),
    Write {
        line1: String,
        line2: String,
        row: u8,
    },
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct RecordingPin(pub Log);

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Low);
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::High);
        Ok(())
    }
}

/// Records like [`RecordingPin`] but refuses the selected levels
pub struct FlakyPin {
    pub log: Log,
    pub fail_high: bool,
    pub fail_low: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for FlakyPin {
    type Error = PinFault;
}

impl OutputPin for FlakyPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        if self.fail_low {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(Event::Low);
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), PinFault> {
        if self.fail_high {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(Event::High);
        Ok(())
    }
}

pub struct RecordingDelay(pub Log);

impl RecordingDelay {
    pub fn total_ms(log: &Log) -> u64 {
        log.borrow()
            .iter()
            .map(|event| match event {
                Event::DelayMs(ms) => u64::from(*ms),
                _ => 0,
            })
            .sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub struct RecordingDisplay(pub Log);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault;

/// Records writes until `remaining` runs out, then faults
pub struct WearingDisplay {
    pub inner: RecordingDisplay,
    pub remaining: usize,
}

impl StatusDisplay for WearingDisplay {
    type Error = BusFault;

    fn write(&mut self, line1: &str, line2: &str, row_start: u8) -> Result<(), BusFault> {
        if self.remaining == 0 {
            return Err(BusFault);
        }
        self.remaining -= 1;
        let _ = self.inner.write(line1, line2, row_start);
        Ok(())
    }
}

impl StatusDisplay for RecordingDisplay {
    type Error = Infallible;

    fn write(&mut self, line1: &str, line2: &str, row_start: u8) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Write {
            line1: line1.to_string(),
            line2: line2.to_string(),
            row: row_start,
        });
        Ok(())
    }
}

/// Yields 0, 1, 2, ... as random bytes, wrapping at 256
#[derive(Default)]
pub struct CountingRng {
    next: u8,
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        u32::from(self.next_byte())
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_byte())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CountingRng {
    fn next_byte(&mut self) -> u8 {
        let byte = self.next;
        self.next = self.next.wrapping_add(1);
        byte
    }
}

pub fn writes(log: &Log) -> Vec<(String, String, u8)> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Write { line1, line2, row } => Some((line1.clone(), line2.clone(), *row)),
            _ => None,
        })
        .collect()
}

pub fn write(line1: &str, line2: &str, row: u8) -> (String, String, u8) {
    (line1.to_string(), line2.to_string(), row)
}

/// Plays back a fixed script; `None` entries are empty polls
pub struct ScriptedInput(VecDeque<Option<Input>>);

#[derive(Debug, PartialEq, Eq)]
pub struct Exhausted;

impl ScriptedInput {
    pub fn new(script: &[Option<Input>]) -> Self {
        Self(script.iter().copied().collect())
    }

    pub fn presses(script: &[Input]) -> Self {
        Self(script.iter().copied().map(Some).collect())
    }

    pub fn is_exhausted(&self) -> bool {
        self.0.is_empty()
    }
}

impl EncoderInput for ScriptedInput {
    type Error = Exhausted;

    fn poll(&mut self) -> Result<Option<Input>, Exhausted> {
        self.0.pop_front().ok_or(Exhausted)
    }
}
