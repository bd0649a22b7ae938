use chrono::{NaiveDate, NaiveTime};
use crossterm::event::KeyEvent;

use crate::domain::{DurationUnit, DurationUnits, FieldValue};

use super::bounded::IntegerBounds;
use super::custom::RenderHook;
use super::scalar_list::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Text,
    Toggle,
    Enum,
    BoundedInteger,
    Duration,
    DateTime,
    List,
    Custom,
}

/// Variant-specific display state of a control.
///
/// Operations return the display value the control should write, or `None`
/// when the event left the value unchanged. The control checks `kind()`
/// before calling a variant-specific operation.
pub(crate) trait FieldComponent: std::fmt::Debug + Send {
    fn kind(&self) -> ComponentKind;

    fn display_value(&self) -> String;

    fn seed_value(&mut self, value: &FieldValue);

    /// Last stop of a display value before it reaches the field.
    fn accept(&mut self, value: FieldValue) -> FieldValue {
        value
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        let _ = key;
        None
    }

    fn toggle(&mut self) -> Option<FieldValue> {
        None
    }

    fn enum_state(&self) -> Option<EnumStateRef<'_>> {
        None
    }

    fn select_enum(&mut self, _index: usize) -> Option<FieldValue> {
        None
    }

    fn integer_bounds(&self) -> Option<IntegerBounds> {
        None
    }

    fn duration_state(&self) -> Option<DurationStateRef<'_>> {
        None
    }

    fn set_duration_component(&mut self, _unit: DurationUnit, _count: u64) -> Option<FieldValue> {
        None
    }

    fn set_date(&mut self, _date: NaiveDate) -> Option<FieldValue> {
        None
    }

    fn set_time(&mut self, _time: NaiveTime) -> Option<FieldValue> {
        None
    }

    fn list_state(&self) -> Option<&ListState> {
        None
    }

    fn list_state_mut(&mut self) -> Option<&mut ListState> {
        None
    }

    fn render_hook(&self) -> Option<&RenderHook> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct EnumStateRef<'a> {
    pub options: &'a [String],
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct DurationStateRef<'a> {
    pub units: DurationUnits,
    pub focus: DurationUnit,
    pub(crate) slots: &'a [u64; 5],
    pub(crate) coarsest: Option<DurationUnit>,
}

impl DurationStateRef<'_> {
    /// Current count of `unit`, or `None` when the unit is not selected.
    pub fn component(&self, unit: DurationUnit) -> Option<u64> {
        self.units
            .contains(unit)
            .then(|| self.slots[unit.slot()])
    }

    /// Editable maximum of `unit`; the coarsest selected unit is unbounded.
    pub fn max(&self, unit: DurationUnit) -> u64 {
        if self.coarsest == Some(unit) {
            u64::MAX
        } else {
            unit.natural_max()
        }
    }
}
