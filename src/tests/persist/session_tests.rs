use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EntityRecord, FieldDescriptor, FieldValue};
use crate::form::BindError;
use crate::options::BinderOptions;
use crate::persist::{MemoryStorage, SaveOutcome, Storage};
use crate::session::EditSession;

fn hangar(kind: &str, bays: i64) -> EntityRecord {
    EntityRecord::new(
        "hangar",
        vec![
            FieldDescriptor::new("type", kind),
            FieldDescriptor::new("bays", bays),
        ],
    )
    .expect("record")
}

#[derive(Debug, Error)]
#[error("storage offline")]
struct Offline;

struct OfflineStorage;

#[async_trait]
impl Storage for OfflineStorage {
    type Error = Offline;

    async fn create(&self, _entity: &EntityRecord) -> Result<(), Offline> {
        Err(Offline)
    }

    async fn update(&self, _entity: &EntityRecord) -> Result<(), Offline> {
        Err(Offline)
    }

    async fn delete(&self, _entity: &EntityRecord) -> Result<(), Offline> {
        Err(Offline)
    }
}

#[test]
fn opening_a_session_is_clean() {
    let session = EditSession::edit(hangar("Main", 1), BinderOptions::default()).expect("session");
    assert!(!session.is_dirty());
    assert_eq!(session.controls().len(), 2);
    assert_eq!(session.original(), Some(&hangar("Main", 1)));
}

#[test]
fn edits_mark_the_session_dirty() {
    let mut session =
        EditSession::edit(hangar("Main", 1), BinderOptions::default()).expect("session");
    session.set(1, 4_i64).expect("set");
    assert!(session.is_dirty());
    assert_eq!(session.value(1), Ok(&FieldValue::Integer(4)));
    assert_eq!(session.original(), Some(&hangar("Main", 1)));
}

#[test]
fn out_of_range_control_is_an_error() {
    let mut session =
        EditSession::create(hangar("Main", 1), BinderOptions::default()).expect("session");
    assert_eq!(
        session.toggle(9).expect_err("no such control"),
        BindError::FieldIndexOutOfRange { index: 9, len: 2 }
    );
}

#[test]
fn load_retires_the_previous_draft() {
    let mut session =
        EditSession::create(hangar("Main", 1), BinderOptions::default()).expect("session");
    let stale = session.controls()[0].field_ref();

    session
        .load(Some(hangar("Depot", 3)), hangar("Depot", 3))
        .expect("load");

    assert_eq!(session.draft(), &hangar("Depot", 3));
    assert!(!session.records().contains(stale.record));
    assert_eq!(session.value(1), Ok(&FieldValue::Integer(3)));
}

#[tokio::test]
async fn invalid_save_flags_controls() {
    let storage = MemoryStorage::new();
    let mut session =
        EditSession::create(hangar("Main", 1), BinderOptions::default()).expect("session");
    session.set(0, "").expect("clear key");

    let outcome = session.save(&storage).await.expect("save");

    assert_eq!(outcome, SaveOutcome::Invalid);
    assert_eq!(
        session.control(0).ok().and_then(|c| c.error()),
        Some("type must not be empty")
    );
    assert!(session.is_dirty());
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn successful_save_becomes_the_new_original() {
    let storage = MemoryStorage::new();
    let mut session =
        EditSession::create(hangar("Main", 1), BinderOptions::default()).expect("session");
    session.set(1, 2_i64).expect("set");

    assert_eq!(session.save(&storage).await.expect("create"), SaveOutcome::Created);
    assert!(!session.is_dirty());
    assert_eq!(session.original(), Some(&hangar("Main", 2)));

    session.set(1, 5_i64).expect("set");
    assert_eq!(session.save(&storage).await.expect("update"), SaveOutcome::Updated);
    assert_eq!(storage.records().await, vec![hangar("Main", 5)]);
}

#[tokio::test]
async fn renaming_moves_the_stored_record() {
    let storage = MemoryStorage::new();
    storage.create(&hangar("Main", 1)).await.expect("seed");
    let mut session =
        EditSession::edit(hangar("Main", 1), BinderOptions::default()).expect("session");
    session.set(0, "Secondary").expect("rename");

    assert_eq!(session.save(&storage).await.expect("save"), SaveOutcome::Updated);
    assert_eq!(storage.records().await, vec![hangar("Secondary", 1)]);
}

#[tokio::test]
async fn storage_failure_keeps_session_state() {
    let mut session =
        EditSession::create(hangar("Main", 1), BinderOptions::default()).expect("session");
    session.set(1, 9_i64).expect("set");

    let result = session.save(&OfflineStorage).await;

    assert!(result.is_err());
    assert!(session.is_dirty());
    assert_eq!(session.original(), None);
    assert_eq!(session.draft(), &hangar("Main", 9));
}
