//! Rotary encoder menu
//!
//! [`EncoderMenu`] is the on-device [`MenuToolkit`]: it polls an
//! [`EncoderInput`] for knob and button events and renders the active entry
//! or picker on the first row of a [`StatusDisplay`].
//!
//! Turning the knob on the top-level menu scrolls between entries and a press
//! opens the highlighted one. Inside a picker the knob changes the value and a
//! press confirms it. Finishing a picker returns to the top-level menu, except
//! for the last entry whose completion closes the menu.

use core::fmt::{Debug, Write};

use embedded_hal::delay::DelayNs;

use crate::config::{FieldId, IntegerField};
use crate::error::MenuError;
use crate::interface::StatusDisplay;
use crate::menu::{FieldValue, FieldValues, Input, MenuToolkit, Step, StepStatus};
use crate::picker::{ChoicePicker, IntegerPicker, Picker, Wizard};
use crate::status::StatusLine;

/// Maximum number of top-level menu entries
pub const MAX_MENU_ENTRIES: usize = 4;

/// Default pause between two polls that returned nothing
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 20;

/// Source of decoded encoder events
pub trait EncoderInput {
    /// Error type for reading the encoder
    type Error: Debug;

    /// Return the next pending event, if any, without blocking
    fn poll(&mut self) -> Result<Option<Input>, Self::Error>;
}

impl<T: EncoderInput + ?Sized> EncoderInput for &mut T {
    type Error = T::Error;

    fn poll(&mut self) -> Result<Option<Input>, Self::Error> {
        T::poll(self)
    }
}

/// Top-level menu built by [`EncoderMenu`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootMenu {
    entries: heapless::Vec<(&'static str, Picker), MAX_MENU_ENTRIES>,
    selected: usize,
    active: Option<usize>,
}

impl RootMenu {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the menu has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the highlighted entry
    pub fn selected_label(&self) -> &'static str {
        self.entries.get(self.selected).map_or("", |(label, _)| *label)
    }

    /// Feed one input; returns `true` once the last entry is completed
    fn handle(&mut self, input: Input, values: &mut FieldValues) -> bool {
        let len = self.entries.len();
        match (self.active, input) {
            (None, Input::Clockwise) => self.selected = (self.selected + 1) % len,
            (None, Input::CounterClockwise) => self.selected = (self.selected + len - 1) % len,
            (None, Input::Press) => {
                if let Some((label, picker)) = self.entries.get_mut(self.selected) {
                    log::debug!("Entering {label}");
                    picker.restart();
                    self.active = Some(self.selected);
                }
            }
            (Some(index), input) => {
                let Some((label, picker)) = self.entries.get_mut(index) else {
                    self.active = None;
                    return false;
                };
                if picker.advance(input, values) == StepStatus::Done {
                    log::debug!("Leaving {label}");
                    self.active = None;
                    return index + 1 == len;
                }
            }
        }
        false
    }
}

/// [`MenuToolkit`] driven by a rotary encoder with push button
pub struct EncoderMenu<E, S, D> {
    input: E,
    display: S,
    delay: D,
    values: FieldValues,
    poll_interval_ms: u32,
}

impl<E, S, D> EncoderMenu<E, S, D>
where
    E: EncoderInput,
    S: StatusDisplay,
    D: DelayNs,
{
    /// Create a menu reading `input` and rendering on `display`
    pub fn new(input: E, display: S, delay: D) -> Self {
        Self {
            input,
            display,
            delay,
            values: FieldValues::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Set the pause between two empty polls
    #[must_use]
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u32) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Release the input, display and delay
    pub fn into_parts(self) -> (E, S, D) {
        (self.input, self.display, self.delay)
    }

    fn next_input(&mut self) -> Result<Input, MenuError<E::Error, S::Error>> {
        loop {
            if let Some(input) = self.input.poll().map_err(MenuError::Input)? {
                return Ok(input);
            }
            self.delay.delay_ms(self.poll_interval_ms);
        }
    }

    fn render(&mut self, root: &RootMenu) -> Result<(), MenuError<E::Error, S::Error>> {
        let active = root
            .active
            .and_then(|index| root.entries.get(index))
            .map(|(_, picker)| picker);
        let result = match active {
            Some(picker) => {
                let value = value_text(picker.current_value());
                self.display.write(picker.caption(), &value, 0)
            }
            None => self.display.write(root.selected_label(), "", 0),
        };
        result.map_err(MenuError::Display)
    }
}

/// Text shown for a picker value
fn value_text(value: FieldValue) -> StatusLine {
    let mut text = StatusLine::new();
    match value {
        FieldValue::Integer(number) => {
            let _ = write!(text, "{number}");
        }
        FieldValue::Choice(option) => {
            let _ = text.push_str(option);
        }
    }
    text
}

impl<E, S, D> MenuToolkit for EncoderMenu<E, S, D>
where
    E: EncoderInput,
    S: StatusDisplay,
    D: DelayNs,
{
    type Picker = Picker;
    type Root = RootMenu;
    type Error = MenuError<E::Error, S::Error>;

    fn integer_field(&mut self, field: IntegerField) -> Picker {
        self.values
            .set(field.field, FieldValue::Integer(field.default));
        IntegerPicker::new(field).into()
    }

    fn choice_field(
        &mut self,
        field: FieldId,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Picker {
        let picker = ChoicePicker::new(field, options, default);
        self.values.set(field, picker.current_value());
        picker.into()
    }

    fn wizard<const N: usize>(
        &mut self,
        steps: [(&'static str, Picker); N],
    ) -> Result<Picker, Self::Error> {
        let mut wizard = Wizard::new();
        for (label, picker) in steps {
            wizard
                .push(label, picker)
                .map_err(|max| MenuError::Capacity { max })?;
        }
        Ok(Picker::Wizard(wizard))
    }

    fn build_menu<const N: usize>(
        &mut self,
        entries: [(&'static str, Picker); N],
    ) -> Result<RootMenu, Self::Error> {
        let mut root = RootMenu::default();
        for entry in entries {
            root.entries.push(entry).map_err(|_| MenuError::Capacity {
                max: MAX_MENU_ENTRIES,
            })?;
        }
        Ok(root)
    }

    fn run(&mut self, root: &mut RootMenu) -> Result<(), Self::Error> {
        if root.is_empty() {
            return Ok(());
        }
        root.selected = 0;
        root.active = None;
        self.render(root)?;
        loop {
            let input = self.next_input()?;
            if root.handle(input, &mut self.values) {
                log::debug!("Menu closed");
                return Ok(());
            }
            self.render(root)?;
        }
    }

    fn read_all_fields(&self) -> FieldValues {
        self.values
    }
}
