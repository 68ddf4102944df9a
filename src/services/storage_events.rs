//! Storage change notifications between browsing contexts.
//!
//! A [`StorageEventBus`] is shared by every context opened over the same
//! persistent store. Writes are published after they land; listeners only hear
//! about writes made by *other* contexts, mirroring how a browser fires
//! `storage` events in every tab except the one that wrote. The bus adds no
//! locking around read-modify-write cycles: listeners simply re-read after the
//! fact.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::types::storage::{ContextId, StorageEvent, SubscriptionId};

/// Callback invoked for each delivered event.
pub type StorageListener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    context: ContextId,
    listener: StorageListener,
}

/// Observer registry for storage changes.
pub struct StorageEventBus {
    next_id: AtomicU64,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl StorageEventBus {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Registers `listener` on behalf of `context`.
    ///
    /// The listener never receives events whose `source` is `context`.
    pub fn subscribe(&self, context: ContextId, listener: StorageListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        match self.subscriptions.lock() {
            Ok(mut subs) => subs.push(Subscription {
                id,
                context,
                listener,
            }),
            Err(e) => log::warn!("storage event bus lock poisoned, listener dropped: {}", e),
        }
        id
    }

    /// Removes a subscription. Returns `false` if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut subs) = self.subscriptions.lock() else {
            return false;
        };
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    /// Removes every subscription registered by `context` and returns how many
    /// were dropped.
    pub fn unsubscribe_context(&self, context: ContextId) -> usize {
        let Ok(mut subs) = self.subscriptions.lock() else {
            return 0;
        };
        let before = subs.len();
        subs.retain(|s| s.context != context);
        before - subs.len()
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Delivers `event` to every listener registered by another context and
    /// returns how many were called.
    ///
    /// Listeners run after the registry lock is released, so they may write to
    /// storage or (un)subscribe themselves.
    pub fn publish(&self, event: &StorageEvent) -> usize {
        let targets: Vec<StorageListener> = match self.subscriptions.lock() {
            Ok(subs) => subs
                .iter()
                .filter(|s| s.context != event.source)
                .map(|s| Arc::clone(&s.listener))
                .collect(),
            Err(_) => return 0,
        };

        for listener in &targets {
            listener(event);
        }
        log::trace!("published change of '{}' to {} listener(s)", event.key, targets.len());
        targets.len()
    }
}

impl Default for StorageEventBus {
    fn default() -> Self {
        Self::new()
    }
}
