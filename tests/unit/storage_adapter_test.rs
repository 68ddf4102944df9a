//! Unit tests for the storage adapter public API.
//!
//! The same contract is checked against both persistent backends, plus the
//! fail-safe behavior when the store is disabled or full.

use std::sync::Arc;

use recent_history::services::storage_adapter::{Storage, StorageAdapterTrait};
use recent_history::storage::{KeyValueStore, MemoryStore, SqliteStore};
use recent_history::types::errors::StorageError;
use rstest::rstest;

fn memory_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

fn sqlite_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(SqliteStore::open_in_memory().expect("Failed to open in-memory store"))
}

#[rstest]
#[case::memory(memory_backend())]
#[case::sqlite(sqlite_backend())]
fn test_save_then_get(#[case] backend: Arc<dyn KeyValueStore>) {
    let storage = Storage::new(backend);
    storage.save("sonar.key", Some("value"), None);
    assert_eq!(storage.get("sonar.key", None).as_deref(), Some("value"));
}

#[rstest]
#[case::memory(memory_backend())]
#[case::sqlite(sqlite_backend())]
fn test_suffix_builds_composite_key(#[case] backend: Arc<dyn KeyValueStore>) {
    let storage = Storage::new(Arc::clone(&backend));
    storage.save("filters", Some("open"), Some("project-a"));

    assert_eq!(
        backend.get_item("filters.project-a").unwrap().as_deref(),
        Some("open")
    );
    assert_eq!(storage.get("filters", Some("project-a")).as_deref(), Some("open"));
    assert_eq!(storage.get("filters", None), None);
}

#[rstest]
#[case::memory(memory_backend())]
#[case::sqlite(sqlite_backend())]
fn test_save_without_value_removes(#[case] backend: Arc<dyn KeyValueStore>) {
    let storage = Storage::new(backend);
    storage.save("k", Some("v"), Some("s"));
    storage.save("k", None, Some("s"));
    assert_eq!(storage.get("k", Some("s")), None);
}

#[rstest]
#[case::memory(memory_backend())]
#[case::sqlite(sqlite_backend())]
fn test_remove_is_harmless_when_absent(#[case] backend: Arc<dyn KeyValueStore>) {
    let storage = Storage::new(backend);
    storage.remove("never-written", None);
    assert!(storage.try_remove("never-written", Some("x")).is_ok());
}

#[test]
fn test_disabled_store_reads_none_and_ignores_writes() {
    let store = Arc::new(MemoryStore::new());
    store.set_item("k", "before").unwrap();
    let storage = Storage::new(store.clone());

    store.set_available(false);
    storage.save("k", Some("after"), None);
    storage.remove("k", None);
    assert_eq!(storage.get("k", None), None);
    assert!(matches!(
        storage.try_get("k", None),
        Err(StorageError::Unavailable(_))
    ));

    store.set_available(true);
    assert_eq!(storage.get("k", None).as_deref(), Some("before"));
}

#[test]
fn test_quota_exceeded_is_a_silent_no_op() {
    let storage = Storage::new(Arc::new(MemoryStore::with_quota(10)));

    storage.save("big", Some("0123456789abcdef"), None);
    assert_eq!(storage.get("big", None), None);
    assert!(matches!(
        storage.try_save("big", Some("0123456789abcdef"), None),
        Err(StorageError::QuotaExceeded(_))
    ));
}

#[test]
fn test_session_area_contract() {
    let storage = Storage::in_memory();

    storage.session_save("wizard", Some("2"), Some("create-project"));
    assert_eq!(
        storage.session_get("wizard", Some("create-project")).as_deref(),
        Some("2")
    );
    assert_eq!(storage.get("wizard", Some("create-project")), None);

    storage.session_save("wizard", Some(""), Some("create-project"));
    assert_eq!(storage.session_get("wizard", Some("create-project")), None);

    storage.session_save("other", Some("x"), None);
    storage.session_remove("other", None);
    assert_eq!(storage.session_get("other", None), None);
}

#[test]
fn test_disabled_session_store_is_fail_safe() {
    let session = Arc::new(MemoryStore::new());
    let storage = Storage::with_session_store(Arc::new(MemoryStore::new()), session.clone());
    session.set_available(false);

    storage.session_save("k", Some("v"), None);
    assert_eq!(storage.session_get("k", None), None);
    storage.session_remove("k", None);
    assert!(storage.try_session_get("k", None).is_err());
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let storage = Storage::new(Arc::new(SqliteStore::open(&path).unwrap()));
        storage.save("sonar_recent_history", Some("[]"), None);
        storage.session_save("session-only", Some("v"), None);
    }

    let storage = Storage::new(Arc::new(SqliteStore::open(&path).unwrap()));
    assert_eq!(storage.get("sonar_recent_history", None).as_deref(), Some("[]"));
    assert_eq!(storage.session_get("session-only", None), None);
}
