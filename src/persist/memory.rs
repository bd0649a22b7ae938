use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{EntityRecord, FieldValue};

use super::storage::Storage;

#[derive(Debug, Error)]
pub enum MemoryStorageError {
    #[error("record with key {0} already exists")]
    Duplicate(String),
    #[error("record with key {0} does not exist")]
    Missing(String),
    #[error("failed to encode record key: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Insertion-ordered in-process store keyed by each record's primary-key tuple.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<IndexMap<String, EntityRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical identity of `entity`: its primary-key values as a JSON array.
    pub fn key_of(entity: &EntityRecord) -> Result<String, MemoryStorageError> {
        let values: Vec<&FieldValue> = entity
            .primary_fields()
            .map(|(_, field)| field.value())
            .collect();
        Ok(serde_json::to_string(&values)?)
    }

    pub async fn get(&self, entity: &EntityRecord) -> Result<Option<EntityRecord>, MemoryStorageError> {
        let key = Self::key_of(entity)?;
        Ok(self.records.lock().await.get(&key).cloned())
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// All stored records in insertion order.
    pub async fn records(&self) -> Vec<EntityRecord> {
        self.records.lock().await.values().cloned().collect()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    type Error = MemoryStorageError;

    async fn create(&self, entity: &EntityRecord) -> Result<(), Self::Error> {
        let key = Self::key_of(entity)?;
        let mut records = self.records.lock().await;
        if records.contains_key(&key) {
            return Err(MemoryStorageError::Duplicate(key));
        }
        debug!(%key, "memory storage create");
        records.insert(key, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &EntityRecord) -> Result<(), Self::Error> {
        let key = Self::key_of(entity)?;
        let mut records = self.records.lock().await;
        match records.get_mut(&key) {
            Some(stored) => {
                debug!(%key, "memory storage update");
                *stored = entity.clone();
                Ok(())
            }
            None => Err(MemoryStorageError::Missing(key)),
        }
    }

    async fn delete(&self, entity: &EntityRecord) -> Result<(), Self::Error> {
        let key = Self::key_of(entity)?;
        let mut records = self.records.lock().await;
        match records.shift_remove(&key) {
            Some(_) => {
                debug!(%key, "memory storage delete");
                Ok(())
            }
            None => Err(MemoryStorageError::Missing(key)),
        }
    }
}
