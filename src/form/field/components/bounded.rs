use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::domain::FieldValue;

use super::helpers::step_direction;
use super::{ComponentKind, FieldComponent, palette::ComponentPalette};

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerBounds {
    pub min: i64,
    pub max: i64,
}

impl IntegerBounds {
    /// Swaps the ends when given in the wrong order.
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Integer control that never leaves its bounds.
#[derive(Debug, Clone)]
pub struct BoundedIntegerComponent {
    value: i64,
    bounds: IntegerBounds,
    palette: Arc<ComponentPalette>,
}

impl BoundedIntegerComponent {
    pub fn new(bounds: IntegerBounds, palette: Arc<ComponentPalette>) -> Self {
        Self {
            value: bounds.min,
            bounds,
            palette,
        }
    }
}

impl FieldComponent for BoundedIntegerComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::BoundedInteger
    }

    fn display_value(&self) -> String {
        self.value.to_string()
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(number) = value.as_integer() {
            self.value = self.bounds.clamp(number);
        }
    }

    fn accept(&mut self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Integer(number) => {
                self.value = self.bounds.clamp(number);
                FieldValue::Integer(self.value)
            }
            other => other,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        let next = match key.code {
            KeyCode::Home => self.bounds.min,
            KeyCode::End => self.bounds.max,
            _ => {
                let direction = step_direction(key);
                if direction == 0 {
                    return None;
                }
                let fast = key.modifiers.contains(KeyModifiers::SHIFT);
                let step = self.palette.numeric.step_i64(fast).saturating_mul(direction);
                self.bounds.clamp(self.value.saturating_add(step))
            }
        };
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(FieldValue::Integer(next))
    }

    fn integer_bounds(&self) -> Option<IntegerBounds> {
        Some(self.bounds)
    }
}
