//! History Manager for recent-history.
//!
//! Implements `HistoryManagerTrait`: a bounded, key-deduplicated list of
//! recently viewed entries, most recent first, persisted as a JSON array under
//! one storage key. Nothing is cached in memory; every call re-reads storage.
//! No operation ever fails: storage problems degrade to "empty" or "no-op".

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::services::storage_adapter::{Storage, StorageAdapterTrait};
use crate::types::history::{
    EnterpriseHistoryEntry, HasKey, OrganizationHistoryEntry, ProjectHistoryEntry,
};
use crate::types::storage::SubscriptionId;

/// Maximum number of entries kept in a history list.
pub const HISTORY_LIMIT: usize = 10;

/// Storage key of the project (component) history.
pub const PROJECT_HISTORY_KEY: &str = "sonar_recent_history";
/// Storage key of the organization history.
pub const ORGANIZATION_HISTORY_KEY: &str = "sonar_recent_history_organizations";
/// Storage key of the enterprise history.
pub const ENTERPRISE_HISTORY_KEY: &str = "sonar_recent_history_enterprises";

/// Trait defining history list operations.
pub trait HistoryManagerTrait<T> {
    fn get(&self) -> Vec<T>;
    fn set(&self, entries: &[T]);
    fn clear(&self);
    fn add(&self, entry: T);
    fn remove(&self, key: &str);
}

/// History manager bound to one storage key.
pub struct HistoryManager<T> {
    storage: Arc<Storage>,
    storage_key: String,
    _entry: PhantomData<fn() -> T>,
}

impl<T> HistoryManager<T>
where
    T: HasKey + Serialize + DeserializeOwned,
{
    /// Creates a manager storing its list under `storage_key`.
    pub fn new(storage: Arc<Storage>, storage_key: &str) -> Self {
        Self {
            storage,
            storage_key: storage_key.to_string(),
            _entry: PhantomData,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Calls `on_change` with the re-read list whenever another context
    /// changes this manager's key. Returns the id to pass to [`Self::unwatch`].
    pub fn watch<F>(&self, on_change: F) -> SubscriptionId
    where
        F: Fn(Vec<T>) + Send + Sync + 'static,
        T: 'static,
    {
        // Weak, so the listener stored in the bus does not keep the storage alive.
        let storage = Arc::downgrade(&self.storage);
        let key = self.storage_key.clone();
        self.storage.subscribe(move |event| {
            if event.key != key {
                return;
            }
            if let Some(storage) = storage.upgrade() {
                on_change(Self::new(storage, &key).get());
            }
        })
    }

    pub fn unwatch(&self, id: SubscriptionId) -> bool {
        self.storage.unsubscribe(id)
    }
}

impl<T> HistoryManagerTrait<T> for HistoryManager<T>
where
    T: HasKey + Serialize + DeserializeOwned,
{
    /// Reads the stored list. A value that is not a JSON array is removed
    /// from storage and treated as empty; array elements that do not fit `T`
    /// are skipped and left in storage untouched.
    fn get(&self) -> Vec<T> {
        let Some(raw) = self.storage.get(&self.storage_key, None) else {
            return Vec::new();
        };

        let items = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(items)) => items,
            Ok(other) => {
                log::warn!(
                    "discarding history under '{}': expected an array, found {}",
                    self.storage_key,
                    other
                );
                self.clear();
                return Vec::new();
            }
            Err(e) => {
                log::warn!(
                    "discarding corrupt history under '{}': {}",
                    self.storage_key,
                    e
                );
                self.clear();
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("skipping history entry under '{}': {}", self.storage_key, e);
                    None
                }
            })
            .collect()
    }

    /// Overwrites the stored list as-is. No size limit is applied here.
    fn set(&self, entries: &[T]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.storage.save(&self.storage_key, Some(&json), None),
            Err(e) => log::warn!(
                "could not serialize history for '{}': {}",
                self.storage_key,
                e
            ),
        }
    }

    fn clear(&self) {
        self.storage.remove(&self.storage_key, None);
    }

    /// Moves `entry` to the front, replacing any entry with the same key, and
    /// keeps at most `HISTORY_LIMIT` entries.
    fn add(&self, entry: T) {
        let mut entries = self.get();
        entries.retain(|e| e.key() != entry.key());
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.set(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.get();
        entries.retain(|e| e.key() != key);
        self.set(&entries);
    }
}

/// Recently viewed projects, portfolios and applications.
pub fn project_history(storage: Arc<Storage>) -> HistoryManager<ProjectHistoryEntry> {
    HistoryManager::new(storage, PROJECT_HISTORY_KEY)
}

/// Recently viewed organizations.
pub fn organization_history(storage: Arc<Storage>) -> HistoryManager<OrganizationHistoryEntry> {
    HistoryManager::new(storage, ORGANIZATION_HISTORY_KEY)
}

/// Recently viewed enterprises.
pub fn enterprise_history(storage: Arc<Storage>) -> HistoryManager<EnterpriseHistoryEntry> {
    HistoryManager::new(storage, ENTERPRISE_HISTORY_KEY)
}
