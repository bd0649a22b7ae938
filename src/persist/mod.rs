mod memory;
mod orchestrator;
mod storage;
mod validation;

pub use memory::{MemoryStorage, MemoryStorageError};
pub use orchestrator::{SaveOutcome, has_primary_changed, save};
pub use storage::Storage;
pub use validation::{FieldIssue, ValidationReport, is_valid, validate};
