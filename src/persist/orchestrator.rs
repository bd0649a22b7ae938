use tracing::{info, warn};

use crate::domain::EntityRecord;

use super::storage::Storage;
use super::validation::is_valid;

/// Result of a save that reached a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    Invalid,
}

/// True iff some primary-key-participating field of `draft` differs by value
/// from the same position in `original`. A new record never changed its key.
pub fn has_primary_changed(original: Option<&EntityRecord>, draft: &EntityRecord) -> bool {
    let Some(original) = original else {
        return false;
    };
    draft.primary_fields().any(|(index, field)| {
        original
            .field(index)
            .map_or(true, |previous| previous.value() != field.value())
    })
}

/// Decides between create, update and rename for `draft`, then awaits the
/// storage calls in order.
///
/// A key edit creates the new identity before deleting the old one. The pair
/// is not transactional: if `delete` fails after `create` succeeded, both
/// identities remain and the error is returned.
pub async fn save<S>(
    original: Option<&EntityRecord>,
    draft: &EntityRecord,
    storage: &S,
) -> Result<SaveOutcome, S::Error>
where
    S: Storage + ?Sized,
{
    if !is_valid(draft) {
        info!(record = draft.name(), "save rejected: invalid record");
        return Ok(SaveOutcome::Invalid);
    }

    let Some(original) = original else {
        info!(record = draft.name(), "creating record");
        storage.create(draft).await?;
        return Ok(SaveOutcome::Created);
    };

    if has_primary_changed(Some(original), draft) {
        info!(record = draft.name(), "primary key changed; replacing record");
        storage.create(draft).await?;
        if let Err(err) = storage.delete(original).await {
            warn!(
                record = draft.name(),
                error = %err,
                "created new identity but failed to delete the old one"
            );
            return Err(err);
        }
    } else {
        info!(record = draft.name(), "updating record");
        storage.update(draft).await?;
    }
    Ok(SaveOutcome::Updated)
}
