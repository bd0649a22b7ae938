use async_trait::async_trait;

use crate::domain::EntityRecord;

/// Backing store for entity records.
///
/// Identity is the record's primary-key tuple and cannot be renamed in place;
/// the orchestrator models a key edit as `create` followed by `delete`.
/// Failures are handed to the save caller unchanged and are never retried.
#[async_trait]
pub trait Storage: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create(&self, entity: &EntityRecord) -> Result<(), Self::Error>;

    async fn update(&self, entity: &EntityRecord) -> Result<(), Self::Error>;

    async fn delete(&self, entity: &EntityRecord) -> Result<(), Self::Error>;
}
