use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::ValueKind;
use crate::form::field::convert::{NumericStep, adjust_numeric_value};

use super::palette::NumericTuning;

pub(crate) fn handle_text_edit(
    buffer: &mut String,
    kind: ValueKind,
    key: &KeyEvent,
    tuning: &NumericTuning,
) -> bool {
    let fast = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Left => adjust_numeric_value(buffer, kind, numeric_step(kind, tuning, fast, -1)),
        KeyCode::Right => adjust_numeric_value(buffer, kind, numeric_step(kind, tuning, fast, 1)),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            buffer.clear();
            true
        }
        _ => false,
    }
}

fn numeric_step(kind: ValueKind, tuning: &NumericTuning, fast: bool, sign: i64) -> NumericStep {
    match kind {
        ValueKind::Float => NumericStep::Float(tuning.step_f64(fast) * sign as f64),
        _ => NumericStep::Integer(tuning.step_i64(fast).saturating_mul(sign)),
    }
}

/// `-1`, `1` or `0` for the stepping keys shared by numeric-like components.
pub(crate) fn step_direction(key: &KeyEvent) -> i64 {
    match key.code {
        KeyCode::Left | KeyCode::Down => -1,
        KeyCode::Right | KeyCode::Up => 1,
        _ => 0,
    }
}

pub(crate) fn format_collection_value(
    label: &str,
    len: usize,
    selection: Option<String>,
    hint: &str,
) -> String {
    if len == 0 {
        format!("{label}: empty {hint}")
    } else {
        let selected = selection.unwrap_or_else(|| "<no selection>".to_string());
        format!("{label}[{len}] • {selected} {hint}")
    }
}
