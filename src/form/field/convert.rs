use crate::domain::{FieldValue, Scalar, ScalarKind, ValueKind};

pub(crate) fn value_to_string(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Integer(num) => num.to_string(),
        FieldValue::Float(num) => num.to_string(),
        FieldValue::Bool(flag) => flag.to_string(),
        FieldValue::Enum(value) => value.selected_label().unwrap_or_default().to_string(),
        FieldValue::List { items, .. } => items
            .iter()
            .map(Scalar::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        FieldValue::Blob(bytes) => format!("<{} bytes>", bytes.len()),
        FieldValue::Object(value) => value.to_string(),
        FieldValue::DateTime(value) => value.to_string(),
        FieldValue::Duration(value) => format!("{value:?}"),
    }
}

/// Parses an edit buffer into a value of `kind`; `None` while the buffer is
/// not yet a valid value.
pub(crate) fn parse_buffer(contents: &str, kind: ValueKind) -> Option<FieldValue> {
    match kind {
        ValueKind::Text => Some(FieldValue::Text(contents.to_string())),
        ValueKind::Integer => contents.trim().parse::<i64>().ok().map(FieldValue::Integer),
        ValueKind::Float => contents.trim().parse::<f64>().ok().map(FieldValue::Float),
        ValueKind::Bool => contents.trim().parse::<bool>().ok().map(FieldValue::Bool),
        _ => None,
    }
}

pub(crate) fn parse_scalar(contents: &str, kind: ScalarKind) -> Option<Scalar> {
    let trimmed = contents.trim();
    match kind {
        ScalarKind::Text => Some(Scalar::Text(contents.to_string())),
        ScalarKind::Integer => trimmed.parse::<i64>().ok().map(Scalar::Integer),
        ScalarKind::Float => trimmed.parse::<f64>().ok().map(Scalar::Float),
        ScalarKind::Bool => trimmed.parse::<bool>().ok().map(Scalar::Bool),
    }
}

pub(crate) fn adjust_numeric_value(buffer: &mut String, kind: ValueKind, delta: NumericStep) -> bool {
    match (kind, delta) {
        (ValueKind::Integer, NumericStep::Integer(step)) => {
            let current = buffer.trim().parse::<i64>().unwrap_or(0);
            *buffer = current.saturating_add(step).to_string();
            true
        }
        (ValueKind::Float, NumericStep::Float(step)) => {
            let current = buffer.trim().parse::<f64>().unwrap_or(0.0);
            *buffer = (current + step).to_string();
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum NumericStep {
    Integer(i64),
    Float(f64),
}
