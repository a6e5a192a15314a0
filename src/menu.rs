//! Menu toolkit interface
//!
//! Settings are collected by an interactive menu toolkit. This module defines
//! the narrow interface the controller consumes ([`MenuToolkit`]), the
//! step contract every picker follows ([`Step`]) and the values read back
//! once the menu closes ([`FieldValues`]).
//!
//! A picker is a chain of steps: each [`Input`] is handed to
//! [`Step::advance`] until the step reports [`StepStatus::Done`]. Wizards are
//! containers of steps that advance through their members in order.

use crate::config::{FieldId, IntegerField};

/// One user action on a rotary encoder with push button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Knob turned one detent clockwise
    Clockwise,
    /// Knob turned one detent counter-clockwise
    CounterClockwise,
    /// Button pressed
    Press,
}

/// Outcome of feeding one input to a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// Step wants more input
    Pending,
    /// Step finished and committed its value(s)
    Done,
}

/// A collected value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Value of a numeric picker
    Integer(u16),
    /// Option chosen in a selection list
    Choice(&'static str),
}

/// Every field value committed by a menu run
///
/// Fields the operator never confirmed are absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: [Option<FieldValue>; FieldId::COUNT],
}

impl FieldValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a committed value
    pub fn set(&mut self, field: FieldId, value: FieldValue) {
        self.values[field.index()] = Some(value);
    }

    /// Value committed for `field`, if any
    pub fn get(&self, field: FieldId) -> Option<FieldValue> {
        self.values[field.index()]
    }

    /// Iterate over committed values in collection order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, FieldValue)> + '_ {
        FieldId::ALL
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
    }
}

/// Contract shared by every picker and wizard
///
/// The toolkit feeds one [`Input`] at a time. A step writes its value into
/// `values` when the operator confirms it.
pub trait Step {
    /// Handle one input
    fn advance(&mut self, input: Input, values: &mut FieldValues) -> StepStatus;

    /// Value currently shown by the active picker
    fn current_value(&self) -> FieldValue;

    /// Caption of the active picker
    fn caption(&self) -> &'static str;

    /// Prepare the step to be entered again from its first picker
    fn restart(&mut self) {}
}

/// Menu toolkit consumed by [`ConfigurationCollector`](crate::ConfigurationCollector)
///
/// Field declaration is infallible. Composition into wizards and the root
/// menu may fail when a fixed-capacity toolkit runs out of room.
pub trait MenuToolkit {
    /// Handle to a declared picker or wizard
    type Picker;
    /// Runnable top-level menu
    type Root;
    /// Error type for composing or running the menu
    type Error: core::fmt::Debug;

    /// Declare a numeric picker
    fn integer_field(&mut self, field: IntegerField) -> Self::Picker;

    /// Declare a selection list; `default` must be one of `options`
    fn choice_field(
        &mut self,
        field: FieldId,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self::Picker;

    /// Chain labelled pickers into a wizard
    fn wizard<const N: usize>(
        &mut self,
        steps: [(&'static str, Self::Picker); N],
    ) -> Result<Self::Picker, Self::Error>;

    /// Build the top-level menu from labelled entries
    fn build_menu<const N: usize>(
        &mut self,
        entries: [(&'static str, Self::Picker); N],
    ) -> Result<Self::Root, Self::Error>;

    /// Block until the operator leaves the top-level menu
    fn run(&mut self, root: &mut Self::Root) -> Result<(), Self::Error>;

    /// Values committed during [`run`](Self::run)
    fn read_all_fields(&self) -> FieldValues;
}
