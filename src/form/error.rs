use thiserror::Error;

use crate::domain::{RecordHandle, ValueKind};

/// Misuse of the binding layer: a wrong index, a retired record or a value
/// that does not fit the field it targets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("entity record `{0}` has no fields")]
    EmptyRecord(String),
    #[error("field index {index} is out of range for a record with {len} fields")]
    FieldIndexOutOfRange { index: usize, len: usize },
    #[error("record {0:?} is no longer registered")]
    RecordGone(RecordHandle),
    #[error("{key}: expected {expected} value, got {found}")]
    KindMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{key}: duration control needs at least one unit")]
    EmptyDurationMask { key: String },
    #[error("{key}: {operation} is not supported by this control")]
    Unsupported { key: String, operation: &'static str },
}

impl BindError {
    pub fn unsupported(key: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            key: key.into(),
            operation,
        }
    }

    pub fn kind_mismatch(key: impl Into<String>, expected: ValueKind, found: ValueKind) -> Self {
        Self::KindMismatch {
            key: key.into(),
            expected,
            found,
        }
    }
}
