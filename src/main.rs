//! recent-history — console demo.
//!
//! Walks through every component against in-memory stores and prints what
//! happens. Set `RUST_LOG=debug` to see the swallowed storage errors.

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use recent_history::managers::history_manager::{
    organization_history, project_history, HistoryManagerTrait, PROJECT_HISTORY_KEY,
};
use recent_history::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use recent_history::services::storage_adapter::{Storage, StorageAdapterTrait};
use recent_history::storage::{MemoryStore, SqliteStore};
use recent_history::types::history::{OrganizationHistoryEntry, ProjectHistoryEntry};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("  recent-history v{} — demo", env!("CARGO_PKG_VERSION"));
    println!();

    demo_storage_adapter();
    demo_fail_safe_storage();
    demo_project_history();
    demo_corruption_recovery();
    demo_cross_context_events();
    demo_sqlite_store()?;
    demo_settings()?;

    println!("  All components demonstrated.");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn project(key: &str, name: &str) -> ProjectHistoryEntry {
    ProjectHistoryEntry {
        key: key.to_string(),
        name: name.to_string(),
        organization: None,
        qualifier: "TRK".to_string(),
    }
}

fn demo_storage_adapter() {
    section("Storage Adapter");
    let storage = Storage::in_memory();

    storage.save("sonar.filters", Some("open"), Some("issues"));
    println!(
        "  save('sonar.filters', 'open', suffix 'issues') -> get = {:?}",
        storage.get("sonar.filters", Some("issues"))
    );

    storage.save("sonar.filters", None, Some("issues"));
    println!(
        "  save without value removes the key -> get = {:?}",
        storage.get("sonar.filters", Some("issues"))
    );

    storage.session_save("wizard.step", Some("2"), None);
    println!(
        "  session area: {:?}, local area: {:?}",
        storage.session_get("wizard.step", None),
        storage.get("wizard.step", None)
    );
    println!();
}

fn demo_fail_safe_storage() {
    section("Fail-safe Storage");
    let store = Arc::new(MemoryStore::with_quota(32));
    let storage = Arc::new(Storage::new(store.clone()));

    storage.save("big", Some(&"x".repeat(64)), None);
    println!("  write over quota is a no-op -> get = {:?}", storage.get("big", None));

    store.set_available(false);
    let history = project_history(Arc::clone(&storage));
    history.add(project("a", "A"));
    println!(
        "  disabled storage: add() is a no-op, get() = {} entries",
        history.get().len()
    );
    println!();
}

fn demo_project_history() {
    section("Project History");
    let history = project_history(Arc::new(Storage::in_memory()));

    history.add(project("a", "A"));
    history.add(project("b", "B"));
    history.add(project("a", "A2"));
    let names: Vec<String> = history.get().into_iter().map(|e| e.name).collect();
    println!("  add a, b, a(renamed) -> {:?}", names);

    for i in 0..12 {
        history.add(project(&format!("p{}", i), &format!("P{}", i)));
    }
    let entries = history.get();
    println!(
        "  after 12 more adds: {} entries, newest = {}, oldest = {}",
        entries.len(),
        entries.first().map(|e| e.key.as_str()).unwrap_or("-"),
        entries.last().map(|e| e.key.as_str()).unwrap_or("-")
    );

    history.remove("p11");
    println!("  remove('p11') -> {} entries", history.get().len());
    history.clear();
    println!("  clear() -> {} entries", history.get().len());
    println!();
}

fn demo_corruption_recovery() {
    section("Corruption Recovery");
    let storage = Arc::new(Storage::in_memory());
    storage.save(PROJECT_HISTORY_KEY, Some("not a json"), None);

    let history = project_history(Arc::clone(&storage));
    println!("  get() on corrupt data -> {} entries", history.get().len());
    println!(
        "  stored value afterwards -> {:?}",
        storage.get(PROJECT_HISTORY_KEY, None)
    );
    println!();
}

fn demo_cross_context_events() {
    section("Cross-context Events");
    let first_tab = Arc::new(Storage::in_memory());
    let second_tab = Arc::new(first_tab.open_context());

    let refreshes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&refreshes);
    let watched = organization_history(Arc::clone(&second_tab));
    let id = watched.watch(move |entries| {
        counter.fetch_add(1, Ordering::SeqCst);
        println!("  second tab sees {} organization(s)", entries.len());
    });

    organization_history(Arc::clone(&first_tab)).add(OrganizationHistoryEntry {
        key: "acme".to_string(),
        name: "Acme".to_string(),
    });
    watched.add(OrganizationHistoryEntry {
        key: "globex".to_string(),
        name: "Globex".to_string(),
    });
    println!(
        "  refreshes delivered to the second tab: {} (its own write is not echoed)",
        refreshes.load(Ordering::SeqCst)
    );
    watched.unwatch(id);
    println!();
}

fn demo_sqlite_store() -> Result<(), Box<dyn Error>> {
    section("SQLite Store");
    let storage = Arc::new(Storage::new(Arc::new(SqliteStore::open_in_memory()?)));
    let history = project_history(storage);
    history.add(project("sqlite", "SQLite backed"));
    println!("  persisted entries: {}", history.get().len());
    println!();
    Ok(())
}

fn demo_settings() -> Result<(), Box<dyn Error>> {
    section("Settings Engine");
    let dir = std::env::temp_dir().join(format!("recent-history-demo-{}", std::process::id()));
    let path = dir.join("settings.json");
    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    engine.load()?;
    engine.set_value("storage.backend", serde_json::json!("Memory"))?;
    println!("  storage.backend = {:?}", engine.get_settings().storage.backend);
    engine.reset()?;
    println!("  after reset = {:?}", engine.get_settings().storage.backend);

    let _ = std::fs::remove_dir_all(&dir);
    println!();
    Ok(())
}
