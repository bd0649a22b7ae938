use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::FieldValue;

use super::{ComponentKind, FieldComponent, palette::ComponentPalette};

/// Date and time edited either as a whole (typed buffer) or part by part
/// (picker results via `set_date` / `set_time`).
#[derive(Debug, Clone)]
pub struct DateTimeComponent {
    value: NaiveDateTime,
    buffer: String,
    palette: Arc<ComponentPalette>,
}

impl DateTimeComponent {
    pub fn new(palette: Arc<ComponentPalette>) -> Self {
        Self {
            value: NaiveDateTime::default(),
            buffer: String::new(),
            palette,
        }
    }

    fn store(&mut self, value: NaiveDateTime) -> FieldValue {
        self.value = value;
        self.buffer = value.format(&self.palette.date_time.pattern).to_string();
        FieldValue::DateTime(value)
    }

    /// Date-only patterns parse to midnight of that day.
    fn parse_buffer(&self) -> Option<NaiveDateTime> {
        let pattern = self.palette.date_time.pattern.as_ref();
        NaiveDateTime::parse_from_str(&self.buffer, pattern)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&self.buffer, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }
}

impl FieldComponent for DateTimeComponent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::DateTime
    }

    fn display_value(&self) -> String {
        self.buffer.clone()
    }

    fn seed_value(&mut self, value: &FieldValue) {
        if let Some(value) = value.as_date_time() {
            self.store(value);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(ch);
            }
            KeyCode::Backspace => {
                self.buffer.pop()?;
            }
            KeyCode::Delete => self.buffer.clear(),
            _ => return None,
        }
        let parsed = self.parse_buffer()?;
        self.value = parsed;
        Some(FieldValue::DateTime(parsed))
    }

    fn set_date(&mut self, date: NaiveDate) -> Option<FieldValue> {
        Some(self.store(NaiveDateTime::new(date, self.value.time())))
    }

    fn set_time(&mut self, time: NaiveTime) -> Option<FieldValue> {
        Some(self.store(NaiveDateTime::new(self.value.date(), time)))
    }
}
