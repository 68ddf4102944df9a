//! Key/value store backends for the storage adapter.
//!
//! Every backend implements [`KeyValueStore`]. Backends report failures as
//! [`StorageError`]; it is the adapter's job to decide whether to swallow them.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::types::errors::StorageError;

/// A string-to-string store shared between browsing contexts.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}
