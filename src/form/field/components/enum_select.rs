use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::{EnumValue, FieldValue};

use super::{ComponentKind, EnumStateRef, FieldComponent, palette::ComponentPalette};

#[derive(Debug, Clone)]
pub struct EnumComponent {
    options: Vec<String>,
    selected: usize,
    palette: Arc<ComponentPalette>,
}

impl EnumComponent {
    pub fn new(palette: Arc<ComponentPalette>) -> Self {
        Self {
            options: Vec::new(),
            selected: 0,
            palette,
        }
    }

    fn current(&self) -> FieldValue {
        FieldValue::Enum(EnumValue {
            options: self.options.clone(),
            selected: self.selected,
        })
    }

    fn step(&mut self, forward: bool) -> Option<FieldValue> {
        if self.options.is_empty() {
            return None;
        }
        let last = self.options.len() - 1;
        let wrap = self.palette.enums.wrap_around;
        let next = match (forward, self.selected) {
            (true, current) if current < last => current + 1,
            (true, _) if wrap => 0,
            (false, 0) if wrap => last,
            (false, current) if current > 0 => current - 1,
            _ => return None,
        };
        self.selected = next;
        Some(self.current())
    }
}

impl FieldComponent for EnumComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Enum
    }

    fn display_value(&self) -> String {
        self.options
            .get(self.selected)
            .cloned()
            .unwrap_or_else(|| "<none>".to_string())
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(value) = value.as_enum() {
            self.options = value.options.clone();
            self.selected = value.selected.min(self.options.len().saturating_sub(1));
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Up | KeyCode::Left => self.step(false),
            KeyCode::Down | KeyCode::Right => self.step(true),
            _ => None,
        }
    }

    fn enum_state(&self) -> Option<EnumStateRef<'_>> {
        Some(EnumStateRef {
            options: &self.options,
            selected: self.selected,
        })
    }

    fn select_enum(&mut self, index: usize) -> Option<FieldValue> {
        if self.options.is_empty() {
            return None;
        }
        self.selected = index.min(self.options.len() - 1);
        Some(self.current())
    }
}
