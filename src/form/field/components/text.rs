use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::domain::{FieldValue, ValueKind};
use crate::form::field::convert::{parse_buffer, value_to_string};

use super::helpers::handle_text_edit;
use super::{ComponentKind, FieldComponent, palette::ComponentPalette};

/// Free-form buffer behind text, integer and float fields.
#[derive(Debug, Clone)]
pub struct TextComponent {
    buffer: String,
    kind: ValueKind,
    palette: Arc<ComponentPalette>,
}

impl TextComponent {
    pub fn new(kind: ValueKind, palette: Arc<ComponentPalette>) -> Self {
        Self {
            buffer: String::new(),
            kind,
            palette,
        }
    }
}

impl FieldComponent for TextComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Text
    }

    fn display_value(&self) -> String {
        self.buffer.clone()
    }

    fn seed_value(&mut self, value: &FieldValue) {
        self.buffer = value_to_string(value);
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        if handle_text_edit(&mut self.buffer, self.kind, key, &self.palette.numeric) {
            parse_buffer(&self.buffer, self.kind)
        } else {
            None
        }
    }
}
