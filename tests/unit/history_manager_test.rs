//! Unit tests for the HistoryManager public API.
//!
//! These tests exercise ordering, deduplication, eviction, removal, corruption
//! recovery and namespace isolation through `HistoryManagerTrait`, using
//! in-memory storage.

use std::sync::Arc;

use recent_history::managers::history_manager::{
    enterprise_history, organization_history, project_history, HistoryManager,
    HistoryManagerTrait, ENTERPRISE_HISTORY_KEY, HISTORY_LIMIT, ORGANIZATION_HISTORY_KEY,
    PROJECT_HISTORY_KEY,
};
use recent_history::services::storage_adapter::{Storage, StorageAdapterTrait};
use recent_history::storage::MemoryStore;
use recent_history::types::history::{
    EnterpriseHistoryEntry, OrganizationHistoryEntry, ProjectHistoryEntry,
};

fn setup() -> Arc<Storage> {
    Arc::new(Storage::in_memory())
}

fn project(key: &str, name: &str) -> ProjectHistoryEntry {
    ProjectHistoryEntry {
        key: key.to_string(),
        name: name.to_string(),
        organization: None,
        qualifier: "TRK".to_string(),
    }
}

fn keys(entries: &[ProjectHistoryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.key.as_str()).collect()
}

#[test]
fn test_touch_and_update_example() {
    let mgr = project_history(setup());

    mgr.add(project("a", "A"));
    mgr.add(project("b", "B"));
    mgr.add(project("a", "A2"));

    assert_eq!(mgr.get(), vec![project("a", "A2"), project("b", "B")]);
}

#[test]
fn test_most_recent_first() {
    let mgr = project_history(setup());
    mgr.add(project("e1", "E1"));
    mgr.add(project("e2", "E2"));

    let entries = mgr.get();
    assert_eq!(entries[0].key, "e2");
    assert_eq!(entries[1].key, "e1");
}

#[test]
fn test_eleventh_entry_evicts_oldest() {
    let mgr = project_history(setup());
    for i in 0..HISTORY_LIMIT {
        mgr.add(project(&format!("p{}", i), "P"));
    }
    assert_eq!(mgr.get().len(), HISTORY_LIMIT);

    mgr.add(project("new", "New"));

    let entries = mgr.get();
    assert_eq!(entries.len(), HISTORY_LIMIT);
    assert_eq!(entries[0].key, "new");
    assert!(!entries.iter().any(|e| e.key == "p0"), "oldest entry must be evicted");
    assert_eq!(
        keys(&entries[1..]),
        vec!["p9", "p8", "p7", "p6", "p5", "p4", "p3", "p2", "p1"]
    );
}

#[test]
fn test_re_adding_old_entry_saves_it_from_eviction() {
    let mgr = project_history(setup());
    for i in 0..HISTORY_LIMIT {
        mgr.add(project(&format!("p{}", i), "P"));
    }

    mgr.add(project("p0", "P0 again"));
    mgr.add(project("new", "New"));

    let entries = mgr.get();
    assert_eq!(entries.len(), HISTORY_LIMIT);
    assert_eq!(keys(&entries[..2]), vec!["new", "p0"]);
    assert!(!entries.iter().any(|e| e.key == "p1"));
}

#[test]
fn test_remove_preserves_relative_order() {
    let mgr = project_history(setup());
    for key in ["a", "b", "c", "d"] {
        mgr.add(project(key, key));
    }

    mgr.remove("b");

    assert_eq!(keys(&mgr.get()), vec!["d", "c", "a"]);
}

#[test]
fn test_remove_missing_key_is_noop() {
    let mgr = project_history(setup());
    mgr.add(project("a", "A"));
    mgr.remove("zzz");
    assert_eq!(mgr.get(), vec![project("a", "A")]);
}

#[test]
fn test_corrupt_value_is_cleared() {
    let storage = setup();
    storage.save(PROJECT_HISTORY_KEY, Some("not a json"), None);

    let mgr = project_history(Arc::clone(&storage));
    assert!(mgr.get().is_empty());
    assert_eq!(storage.get(PROJECT_HISTORY_KEY, None), None);
}

#[test]
fn test_add_after_corruption_starts_fresh() {
    let storage = setup();
    storage.save(PROJECT_HISTORY_KEY, Some("[{\"broken\""), None);

    let mgr = project_history(storage);
    mgr.add(project("a", "A"));
    assert_eq!(mgr.get(), vec![project("a", "A")]);
}

#[test]
fn test_entries_missing_fields_are_skipped() {
    let storage = setup();
    storage.save(
        PROJECT_HISTORY_KEY,
        Some(r#"[{"key":"a","name":"A","qualifier":"TRK"},{"key":"b","name":"B"}]"#),
        None,
    );

    let mgr = project_history(Arc::clone(&storage));
    assert_eq!(mgr.get(), vec![project("a", "A")]);
    assert!(storage.get(PROJECT_HISTORY_KEY, None).is_some());

    mgr.add(project("c", "C"));
    assert_eq!(mgr.get(), vec![project("c", "C"), project("a", "A")]);
}

#[test]
fn test_namespaces_are_independent() {
    let storage = setup();
    let projects = project_history(Arc::clone(&storage));
    let orgs = organization_history(Arc::clone(&storage));
    let enterprises = enterprise_history(Arc::clone(&storage));

    projects.add(project("p", "P"));
    enterprises.add(EnterpriseHistoryEntry {
        key: "e".to_string(),
        name: "E".to_string(),
    });
    orgs.add(OrganizationHistoryEntry {
        key: "o".to_string(),
        name: "O".to_string(),
    });

    assert_eq!(projects.get(), vec![project("p", "P")]);
    assert_eq!(enterprises.get().len(), 1);
    assert_eq!(enterprises.get()[0].key, "e");

    orgs.clear();
    assert!(orgs.get().is_empty());
    assert_eq!(projects.get().len(), 1);
    assert_eq!(enterprises.get().len(), 1);
    assert!(storage.get(ORGANIZATION_HISTORY_KEY, None).is_none());
    assert!(storage.get(ENTERPRISE_HISTORY_KEY, None).is_some());
}

#[test]
fn test_set_then_get_round_trip() {
    let mgr = project_history(setup());
    let list = vec![
        ProjectHistoryEntry {
            key: "app".to_string(),
            name: "App".to_string(),
            organization: Some("acme".to_string()),
            qualifier: "APP".to_string(),
        },
        project("trk", "Trk"),
    ];

    mgr.set(&list);
    assert_eq!(mgr.get(), list);
}

#[test]
fn test_set_does_not_enforce_limit() {
    let mgr = project_history(setup());
    let list: Vec<ProjectHistoryEntry> = (0..15).map(|i| project(&format!("p{}", i), "P")).collect();

    mgr.set(&list);
    assert_eq!(mgr.get().len(), 15);

    mgr.add(project("new", "New"));
    assert_eq!(mgr.get().len(), HISTORY_LIMIT);
}

#[test]
fn test_persisted_layout_is_plain_json_array() {
    let storage = setup();
    let mgr = project_history(Arc::clone(&storage));
    mgr.add(project("a", "A"));

    assert_eq!(
        storage.get(PROJECT_HISTORY_KEY, None).as_deref(),
        Some(r#"[{"key":"a","name":"A","qualifier":"TRK"}]"#)
    );
}

#[test]
fn test_custom_storage_key() {
    let storage = setup();
    let mgr: HistoryManager<OrganizationHistoryEntry> =
        HistoryManager::new(Arc::clone(&storage), "custom_history");
    mgr.add(OrganizationHistoryEntry {
        key: "o".to_string(),
        name: "O".to_string(),
    });

    assert_eq!(mgr.storage_key(), "custom_history");
    assert!(storage.get("custom_history", None).is_some());
    assert!(organization_history(storage).get().is_empty());
}

#[test]
fn test_unavailable_storage_degrades_to_empty() {
    let store = Arc::new(MemoryStore::new());
    let storage = Arc::new(Storage::new(store.clone()));
    let mgr = project_history(storage);
    mgr.add(project("a", "A"));

    store.set_available(false);
    assert!(mgr.get().is_empty());
    mgr.add(project("b", "B"));
    mgr.remove("a");
    mgr.clear();

    store.set_available(true);
    assert_eq!(mgr.get(), vec![project("a", "A")]);
}
