//! Pickers and wizards
//!
//! Concrete [`Step`] implementations used by [`EncoderMenu`](crate::EncoderMenu):
//! a clamped numeric picker, a wrapping selection list and a [`Wizard`]
//! chaining several of them.
//!
//! ## Example
//!
//! ```
//! use intervalometer::config::DELAY_SECS;
//! use intervalometer::menu::{FieldValue, FieldValues, Input, Step, StepStatus};
//! use intervalometer::picker::IntegerPicker;
//!
//! let mut picker = IntegerPicker::new(DELAY_SECS);
//! let mut values = FieldValues::new();
//!
//! assert_eq!(picker.advance(Input::Clockwise, &mut values), StepStatus::Pending);
//! assert_eq!(picker.advance(Input::Press, &mut values), StepStatus::Done);
//! assert_eq!(values.get(DELAY_SECS.field), Some(FieldValue::Integer(2)));
//! ```

use crate::config::{FieldId, IntegerField};
use crate::menu::{FieldValue, FieldValues, Input, Step, StepStatus};

/// Maximum number of pickers a wizard can chain
pub const MAX_WIZARD_STEPS: usize = 8;

/// Numeric picker moving in fixed increments between two bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerPicker {
    bounds: IntegerField,
    value: u16,
}

impl IntegerPicker {
    /// Create a picker showing the field default
    pub fn new(bounds: IntegerField) -> Self {
        Self {
            bounds,
            value: bounds.default,
        }
    }

    /// Field this picker fills in
    pub fn field(&self) -> FieldId {
        self.bounds.field
    }

    /// Value currently shown
    pub fn value(&self) -> u16 {
        self.value
    }
}

impl Step for IntegerPicker {
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus {
        match input {
            Input::Clockwise => {
                self.value = self
                    .value
                    .saturating_add(self.bounds.increment)
                    .min(self.bounds.high);
                StepStatus::Pending
            }
            Input::CounterClockwise => {
                self.value = self
                    .value
                    .saturating_sub(self.bounds.increment)
                    .max(self.bounds.low);
                StepStatus::Pending
            }
            Input::Press => {
                values.set(self.bounds.field, FieldValue::Integer(self.value));
                StepStatus::Done
            }
        }
    }

    fn current_value(&self) -> FieldValue {
        FieldValue::Integer(self.value)
    }

    fn caption(&self) -> &'static str {
        self.bounds.caption
    }
}

/// Selection list cycling through a fixed set of options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChoicePicker {
    field: FieldId,
    options: &'static [&'static str],
    index: usize,
}

impl ChoicePicker {
    /// Create a picker showing `default`, or the first option if `default`
    /// is not among `options`
    pub fn new(field: FieldId, options: &'static [&'static str], default: &'static str) -> Self {
        let index = options
            .iter()
            .position(|option| *option == default)
            .unwrap_or(0);
        Self {
            field,
            options,
            index,
        }
    }

    /// Field this picker fills in
    pub fn field(&self) -> FieldId {
        self.field
    }

    fn selected(&self) -> &'static str {
        self.options.get(self.index).copied().unwrap_or("")
    }
}

impl Step for ChoicePicker {
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus {
        let len = self.options.len();
        match input {
            Input::Clockwise if len > 0 => {
                self.index = (self.index + 1) % len;
                StepStatus::Pending
            }
            Input::CounterClockwise if len > 0 => {
                self.index = (self.index + len - 1) % len;
                StepStatus::Pending
            }
            Input::Clockwise | Input::CounterClockwise => StepStatus::Pending,
            Input::Press => {
                values.set(self.field, FieldValue::Choice(self.selected()));
                StepStatus::Done
            }
        }
    }

    fn current_value(&self) -> FieldValue {
        FieldValue::Choice(self.selected())
    }

    fn caption(&self) -> &'static str {
        ""
    }
}

/// A single field picker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPicker {
    /// Numeric picker
    Integer(IntegerPicker),
    /// Selection list
    Choice(ChoicePicker),
}

impl Step for FieldPicker {
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus {
        match self {
            Self::Integer(picker) => picker.advance(input, values),
            Self::Choice(picker) => picker.advance(input, values),
        }
    }

    fn current_value(&self) -> FieldValue {
        match self {
            Self::Integer(picker) => picker.current_value(),
            Self::Choice(picker) => picker.current_value(),
        }
    }

    fn caption(&self) -> &'static str {
        match self {
            Self::Integer(picker) => picker.caption(),
            Self::Choice(picker) => picker.caption(),
        }
    }
}

/// Labelled pickers walked in order
///
/// Each confirmed picker commits its value and hands over to the next one.
/// The wizard is done after its last picker and starts over on re-entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wizard {
    steps: heapless::Vec<(&'static str, FieldPicker), MAX_WIZARD_STEPS>,
    index: usize,
}

impl Wizard {
    /// Create an empty wizard
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a labelled picker; a nested wizard contributes all its steps
    ///
    /// # Errors
    ///
    /// Returns [`MAX_WIZARD_STEPS`] when the wizard is full.
    pub fn push(&mut self, label: &'static str, picker: Picker) -> Result<(), usize> {
        match picker {
            Picker::Field(field) => self
                .steps
                .push((label, field))
                .map_err(|_| MAX_WIZARD_STEPS),
            Picker::Wizard(wizard) => {
                for step in wizard.steps {
                    self.steps.push(step).map_err(|_| MAX_WIZARD_STEPS)?;
                }
                Ok(())
            }
        }
    }

    /// Number of chained pickers
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the wizard has no pickers
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of the active picker
    pub fn position(&self) -> usize {
        self.index
    }
}

impl Step for Wizard {
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus {
        let Some((_, picker)) = self.steps.get_mut(self.index) else {
            self.index = 0;
            return StepStatus::Done;
        };
        if picker.advance(input, values) == StepStatus::Pending {
            return StepStatus::Pending;
        }
        self.index += 1;
        if self.index < self.steps.len() {
            StepStatus::Pending
        } else {
            self.index = 0;
            StepStatus::Done
        }
    }

    fn current_value(&self) -> FieldValue {
        self.steps
            .get(self.index)
            .map_or(FieldValue::Choice(""), |(_, picker)| picker.current_value())
    }

    fn caption(&self) -> &'static str {
        self.steps.get(self.index).map_or("", |(label, _)| *label)
    }

    fn restart(&mut self) {
        self.index = 0;
    }
}

/// Anything a menu entry can open
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Picker {
    /// A single picker
    Field(FieldPicker),
    /// A chain of pickers
    Wizard(Wizard),
}

impl From<IntegerPicker> for Picker {
    fn from(picker: IntegerPicker) -> Self {
        Self::Field(FieldPicker::Integer(picker))
    }
}

impl From<ChoicePicker> for Picker {
    fn from(picker: ChoicePicker) -> Self {
        Self::Field(FieldPicker::Choice(picker))
    }
}

impl Step for Picker {
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus {
        match self {
            Self::Field(picker) => picker.advance(input, values),
            Self::Wizard(wizard) => wizard.advance(input, values),
        }
    }

    fn current_value(&self) -> FieldValue {
        match self {
            Self::Field(picker) => picker.current_value(),
            Self::Wizard(wizard) => wizard.current_value(),
        }
    }

    fn caption(&self) -> &'static str {
        match self {
            Self::Field(picker) => picker.caption(),
            Self::Wizard(wizard) => wizard.caption(),
        }
    }

    fn restart(&mut self) {
        if let Self::Wizard(wizard) = self {
            wizard.restart();
        }
    }
}
