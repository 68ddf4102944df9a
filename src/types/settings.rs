use serde::{Deserialize, Serialize};

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecentHistorySettings {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub rpc: RpcSettings,
}

/// Which backend holds the persistent (local) storage area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageBackendKind {
    Sqlite,
    Memory,
}

/// Persistent storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub backend: StorageBackendKind,
    /// SQLite file path. `None` means `<data dir>/recent_history.db`.
    pub database_path: Option<String>,
    /// Byte quota for the in-memory backend. `None` means unbounded.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Sqlite,
            database_path: None,
            quota_bytes: None,
        }
    }
}

/// Logging settings, applied when a binary initialises `env_logger`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default filter, e.g. `info` or `recent_history=debug`. `RUST_LOG` wins.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// JSON-RPC server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcSettings {
    pub max_requests_per_second: u32,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            max_requests_per_second: 200,
        }
    }
}
