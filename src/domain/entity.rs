use serde::Serialize;
use serde_json::Value;

use crate::form::BindError;

use super::value::{FieldValue, Scalar, ValueKind};

/// One named field of an entity: immutable metadata plus the current value.
///
/// The value's kind is fixed when the descriptor is built; [`set_value`]
/// refuses values of any other kind.
///
/// [`set_value`]: FieldDescriptor::set_value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    key: String,
    value: FieldValue,
    primary_key: bool,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            primary_key: false,
        }
    }

    /// A field that participates in the entity's identity.
    pub fn primary(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            primary_key: true,
            ..Self::new(key, value)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn is_primary_key_component(&self) -> bool {
        self.primary_key
    }

    pub fn set_value(&mut self, value: FieldValue) -> Result<(), BindError> {
        self.ensure_kind(&value)?;
        self.value = value;
        Ok(())
    }

    pub(crate) fn ensure_kind(&self, value: &FieldValue) -> Result<(), BindError> {
        let expected = self.kind();
        let found = value.kind();
        if expected == found {
            Ok(())
        } else {
            Err(BindError::kind_mismatch(&self.key, expected, found))
        }
    }

    /// In-place access to a list field's items.
    ///
    /// Mutating through this handle does not notify anyone; call
    /// `Control::notify` afterwards. Pushed items must match the list's item kind.
    pub fn items_mut(&mut self) -> Option<&mut Vec<Scalar>> {
        match &mut self.value {
            FieldValue::List { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// An ordered, non-empty set of fields representing one persisted object.
///
/// The field at index 0 is always part of the primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl EntityRecord {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, BindError> {
        let name = name.into();
        if fields.is_empty() {
            return Err(BindError::EmptyRecord(name));
        }
        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Result<&FieldDescriptor, BindError> {
        let len = self.fields.len();
        self.fields
            .get(index)
            .ok_or(BindError::FieldIndexOutOfRange { index, len })
    }

    pub fn field_mut(&mut self, index: usize) -> Result<&mut FieldDescriptor, BindError> {
        let len = self.fields.len();
        self.fields
            .get_mut(index)
            .ok_or(BindError::FieldIndexOutOfRange { index, len })
    }

    pub fn field_by_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }

    pub fn is_primary_participant(&self, index: usize) -> bool {
        index == 0
            || self
                .fields
                .get(index)
                .is_some_and(FieldDescriptor::is_primary_key_component)
    }

    /// Primary-key-participating fields with their indices, in field order.
    pub fn primary_fields(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(index, field)| *index == 0 || field.primary_key)
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
