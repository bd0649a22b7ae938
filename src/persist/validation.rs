use crate::domain::{EntityRecord, FieldValue};

/// One field that blocks a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub index: usize,
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks that no primary-key-participating field holds an empty text value.
/// Every other field is unconstrained.
pub fn validate(entity: &EntityRecord) -> ValidationReport {
    let issues = entity
        .primary_fields()
        .filter(|(_, field)| matches!(field.value(), FieldValue::Text(text) if text.is_empty()))
        .map(|(index, field)| FieldIssue {
            index,
            key: field.key().to_string(),
            message: format!("{} must not be empty", field.key()),
        })
        .collect();
    ValidationReport { issues }
}

pub fn is_valid(entity: &EntityRecord) -> bool {
    validate(entity).is_valid()
}
