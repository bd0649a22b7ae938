use std::ops::Index;

use crate::form::BindError;

use super::entity::{EntityRecord, FieldDescriptor};

/// Non-owning reference to a record held by a [`RecordArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(usize);

/// Address of one field: which record, which position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub record: RecordHandle,
    pub index: usize,
}

impl FieldRef {
    pub const fn new(record: RecordHandle, index: usize) -> Self {
        Self { record, index }
    }
}

/// Owns entity records and resolves handles to them.
///
/// Slots are never reused, so a handle to a removed record keeps failing with
/// [`BindError::RecordGone`] instead of silently pointing at a newer record.
#[derive(Debug, Default)]
pub struct RecordArena {
    slots: Vec<Option<EntityRecord>>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: EntityRecord) -> RecordHandle {
        self.slots.push(Some(record));
        RecordHandle(self.slots.len() - 1)
    }

    pub fn remove(&mut self, handle: RecordHandle) -> Option<EntityRecord> {
        self.slots.get_mut(handle.0).and_then(Option::take)
    }

    pub fn contains(&self, handle: RecordHandle) -> bool {
        matches!(self.slots.get(handle.0), Some(Some(_)))
    }

    pub fn get(&self, handle: RecordHandle) -> Result<&EntityRecord, BindError> {
        self.slots
            .get(handle.0)
            .and_then(Option::as_ref)
            .ok_or(BindError::RecordGone(handle))
    }

    pub fn get_mut(&mut self, handle: RecordHandle) -> Result<&mut EntityRecord, BindError> {
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(BindError::RecordGone(handle))
    }

    pub fn field(&self, field: FieldRef) -> Result<&FieldDescriptor, BindError> {
        self.get(field.record)?.field(field.index)
    }

    pub fn field_mut(&mut self, field: FieldRef) -> Result<&mut FieldDescriptor, BindError> {
        self.get_mut(field.record)?.field_mut(field.index)
    }
}

impl Index<RecordHandle> for RecordArena {
    type Output = EntityRecord;

    /// Panics when the record was removed.
    fn index(&self, handle: RecordHandle) -> &Self::Output {
        match self.get(handle) {
            Ok(record) => record,
            Err(err) => panic!("{err}"),
        }
    }
}
