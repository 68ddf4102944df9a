//! Fail-safe storage adapter.
//!
//! Wraps a persistent (local) key/value store and a session-scoped store.
//! Keys may be namespaced with a suffix (`key.suffix`). The infallible API in
//! [`StorageAdapterTrait`] never reports failures: writes become no-ops and
//! reads return `None`. The `try_*` methods expose the underlying
//! [`StorageError`] for callers that want to know.

use std::sync::Arc;

use crate::services::storage_events::{StorageEventBus, StorageListener};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::errors::StorageError;
use crate::types::storage::{ContextId, StorageArea, StorageEvent, SubscriptionId};

/// Trait defining the infallible storage operations.
pub trait StorageAdapterTrait {
    fn save(&self, key: &str, value: Option<&str>, suffix: Option<&str>);
    fn get(&self, key: &str, suffix: Option<&str>) -> Option<String>;
    fn remove(&self, key: &str, suffix: Option<&str>);
    fn session_save(&self, key: &str, value: Option<&str>, suffix: Option<&str>);
    fn session_get(&self, key: &str, suffix: Option<&str>) -> Option<String>;
    fn session_remove(&self, key: &str, suffix: Option<&str>);
}

/// Storage handle for one browsing context.
pub struct Storage {
    context: ContextId,
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    events: Arc<StorageEventBus>,
}

/// Builds the composite key: `key` alone, or `key.suffix` when a non-empty
/// suffix is given.
pub fn composite_key(key: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(s) if !s.is_empty() => format!("{}.{}", key, s),
        _ => key.to_string(),
    }
}

impl Storage {
    /// Creates a context over `local` with a fresh in-memory session store.
    pub fn new(local: Arc<dyn KeyValueStore>) -> Self {
        Self::with_session_store(local, Arc::new(MemoryStore::new()))
    }

    pub fn with_session_store(
        local: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            context: ContextId::new(),
            local,
            session,
            events: Arc::new(StorageEventBus::new()),
        }
    }

    /// A context whose local and session areas both live in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Opens a sibling context: same local store and event bus, its own
    /// session store and context id.
    pub fn open_context(&self) -> Self {
        Self {
            context: ContextId::new(),
            local: Arc::clone(&self.local),
            session: Arc::new(MemoryStore::new()),
            events: Arc::clone(&self.events),
        }
    }

    pub fn context_id(&self) -> ContextId {
        self.context
    }

    /// Registers a listener for local-area changes made by other contexts.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StorageEvent) + Send + Sync + 'static,
    {
        let listener: StorageListener = Arc::new(listener);
        self.events.subscribe(self.context, listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Number of listeners registered on the bus this context shares.
    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Writes `value` under the composite key, or removes the key when
    /// `value` is absent or empty.
    pub fn try_save(
        &self,
        key: &str,
        value: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<(), StorageError> {
        let full_key = composite_key(key, suffix);
        let old_value = self.previous_value(&full_key);

        let new_value = match value {
            Some(v) if !v.is_empty() => {
                self.local.set_item(&full_key, v)?;
                Some(v.to_string())
            }
            _ => {
                self.local.remove_item(&full_key)?;
                None
            }
        };

        self.notify(full_key, old_value, new_value);
        Ok(())
    }

    pub fn try_get(&self, key: &str, suffix: Option<&str>) -> Result<Option<String>, StorageError> {
        self.local.get_item(&composite_key(key, suffix))
    }

    pub fn try_remove(&self, key: &str, suffix: Option<&str>) -> Result<(), StorageError> {
        let full_key = composite_key(key, suffix);
        let old_value = self.previous_value(&full_key);
        self.local.remove_item(&full_key)?;
        self.notify(full_key, old_value, None);
        Ok(())
    }

    pub fn try_session_save(
        &self,
        key: &str,
        value: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<(), StorageError> {
        let full_key = composite_key(key, suffix);
        match value {
            Some(v) if !v.is_empty() => self.session.set_item(&full_key, v),
            _ => self.session.remove_item(&full_key),
        }
    }

    pub fn try_session_get(
        &self,
        key: &str,
        suffix: Option<&str>,
    ) -> Result<Option<String>, StorageError> {
        self.session.get_item(&composite_key(key, suffix))
    }

    pub fn try_session_remove(&self, key: &str, suffix: Option<&str>) -> Result<(), StorageError> {
        self.session.remove_item(&composite_key(key, suffix))
    }

    /// Reads the current value only when someone could be told about the change.
    fn previous_value(&self, full_key: &str) -> Option<String> {
        if self.events.listener_count() == 0 {
            return None;
        }
        self.local.get_item(full_key).ok().flatten()
    }

    fn notify(&self, key: String, old_value: Option<String>, new_value: Option<String>) {
        if self.events.listener_count() == 0 || old_value == new_value {
            return;
        }
        self.events.publish(&StorageEvent {
            area: StorageArea::Local,
            key,
            old_value,
            new_value,
            source: self.context,
        });
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        let dropped = self.events.unsubscribe_context(self.context);
        if dropped > 0 {
            log::trace!("context closed, dropped {} listener(s)", dropped);
        }
    }
}

impl StorageAdapterTrait for Storage {
    fn save(&self, key: &str, value: Option<&str>, suffix: Option<&str>) {
        if let Err(e) = self.try_save(key, value, suffix) {
            log::debug!("ignoring failed save of '{}': {}", composite_key(key, suffix), e);
        }
    }

    fn get(&self, key: &str, suffix: Option<&str>) -> Option<String> {
        self.try_get(key, suffix).unwrap_or_else(|e| {
            log::debug!("ignoring failed read of '{}': {}", composite_key(key, suffix), e);
            None
        })
    }

    fn remove(&self, key: &str, suffix: Option<&str>) {
        if let Err(e) = self.try_remove(key, suffix) {
            log::debug!("ignoring failed removal of '{}': {}", composite_key(key, suffix), e);
        }
    }

    fn session_save(&self, key: &str, value: Option<&str>, suffix: Option<&str>) {
        if let Err(e) = self.try_session_save(key, value, suffix) {
            log::debug!(
                "ignoring failed session save of '{}': {}",
                composite_key(key, suffix),
                e
            );
        }
    }

    fn session_get(&self, key: &str, suffix: Option<&str>) -> Option<String> {
        self.try_session_get(key, suffix).unwrap_or_else(|e| {
            log::debug!(
                "ignoring failed session read of '{}': {}",
                composite_key(key, suffix),
                e
            );
            None
        })
    }

    fn session_remove(&self, key: &str, suffix: Option<&str>) {
        if let Err(e) = self.try_session_remove(key, suffix) {
            log::debug!(
                "ignoring failed session removal of '{}': {}",
                composite_key(key, suffix),
                e
            );
        }
    }
}
