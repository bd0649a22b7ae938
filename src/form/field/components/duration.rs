use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{DurationUnit, DurationUnits, FieldValue};

use super::{ComponentKind, DurationStateRef, FieldComponent, palette::ComponentPalette};

/// Splits one duration into independently editable unit counts.
///
/// Invariant: re-summing the selected slots reproduces the accepted value
/// truncated to the finest selected unit. Values are counted in `u64`
/// microseconds, so anything longer than `u64::MAX` microseconds (about
/// 584 000 years) is clamped to that length before it is split.
#[derive(Debug, Clone)]
pub struct DurationComponent {
    units: DurationUnits,
    slots: [u64; 5],
    focus: DurationUnit,
    palette: Arc<ComponentPalette>,
}

impl DurationComponent {
    /// `units` must not be empty; the registry rejects empty masks.
    pub fn new(units: DurationUnits, palette: Arc<ComponentPalette>) -> Self {
        Self {
            units,
            slots: [0; 5],
            focus: units.coarsest().unwrap_or(DurationUnit::Seconds),
            palette,
        }
    }

    pub fn units(&self) -> DurationUnits {
        self.units
    }

    fn decompose(&mut self, total: Duration) {
        // Clamped, see the type docs.
        let mut remaining = u64::try_from(total.as_micros()).unwrap_or(u64::MAX);
        self.slots = [0; 5];
        for unit in self.units.descending() {
            let count = remaining / unit.micros();
            self.slots[unit.slot()] = count;
            remaining -= count * unit.micros();
        }
    }

    fn total(&self) -> Duration {
        let micros = self.units.ascending().fold(0u64, |acc, unit| {
            acc.saturating_add(self.slots[unit.slot()].saturating_mul(unit.micros()))
        });
        Duration::from_micros(micros)
    }

    fn max_for(&self, unit: DurationUnit) -> u64 {
        self.state().max(unit)
    }

    fn state(&self) -> DurationStateRef<'_> {
        DurationStateRef {
            units: self.units,
            focus: self.focus,
            slots: &self.slots,
            coarsest: self.units.coarsest(),
        }
    }

    fn move_focus(&mut self, coarser: bool) {
        let next = if coarser {
            self.units.ascending().find(|unit| unit.slot() > self.focus.slot())
        } else {
            self.units.descending().find(|unit| unit.slot() < self.focus.slot())
        };
        if let Some(unit) = next {
            self.focus = unit;
        }
    }
}

impl FieldComponent for DurationComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Duration
    }

    fn display_value(&self) -> String {
        self.units
            .descending()
            .map(|unit| {
                format!(
                    "{}{}",
                    self.slots[unit.slot()],
                    self.palette.durations.suffix(unit)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(total) = value.as_duration() {
            self.decompose(total);
        }
    }

    fn accept(&mut self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Duration(total) => {
                self.decompose(total);
                FieldValue::Duration(self.total())
            }
            other => other,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Up => {
                self.move_focus(true);
                None
            }
            KeyCode::Down => {
                self.move_focus(false);
                None
            }
            KeyCode::Left | KeyCode::Right => {
                let fast = key.modifiers.contains(KeyModifiers::SHIFT);
                let step = self.palette.numeric.step_i64(fast).unsigned_abs();
                let current = self.slots[self.focus.slot()];
                let next = if key.code == KeyCode::Right {
                    current.saturating_add(step)
                } else {
                    current.saturating_sub(step)
                };
                self.set_duration_component(self.focus, next)
            }
            _ => None,
        }
    }

    fn duration_state(&self) -> Option<DurationStateRef<'_>> {
        Some(self.state())
    }

    fn set_duration_component(&mut self, unit: DurationUnit, count: u64) -> Option<FieldValue> {
        if !self.units.contains(unit) {
            return None;
        }
        let bounded = count.min(self.max_for(unit));
        if bounded == self.slots[unit.slot()] {
            return None;
        }
        self.slots[unit.slot()] = bounded;
        Some(FieldValue::Duration(self.total()))
    }
}
