use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::FieldValue;

use super::{ComponentKind, FieldComponent, palette::ComponentPalette};

#[derive(Debug, Clone)]
pub struct BoolComponent {
    value: bool,
    palette: Arc<ComponentPalette>,
}

impl BoolComponent {
    pub fn new(palette: Arc<ComponentPalette>) -> Self {
        Self {
            value: false,
            palette,
        }
    }

    fn flip(&mut self) -> FieldValue {
        self.value = !self.value;
        FieldValue::Bool(self.value)
    }
}

impl FieldComponent for BoolComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Toggle
    }

    fn display_value(&self) -> String {
        if self.value {
            self.palette.bools.true_label.to_string()
        } else {
            self.palette.bools.false_label.to_string()
        }
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(flag) = value.as_bool() {
            self.value = flag;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Char(' ') if self.palette.bools.toggle_with_space => Some(self.flip()),
            KeyCode::Left | KeyCode::Right if self.palette.bools.toggle_with_arrows => {
                Some(self.flip())
            }
            _ => None,
        }
    }

    fn toggle(&mut self) -> Option<FieldValue> {
        Some(self.flip())
    }
}
