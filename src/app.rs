//! App Core for recent-history.
//!
//! Central struct holding the storage handle, the settings engine and one
//! long-lived instance of each history manager.

use std::sync::Arc;

use crate::managers::history_manager::{
    enterprise_history, organization_history, project_history, HistoryManager,
};
use crate::platform;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::storage_adapter::Storage;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};
use crate::types::errors::StorageError;
use crate::types::history::{EnterpriseHistoryEntry, OrganizationHistoryEntry, ProjectHistoryEntry};
use crate::types::settings::{StorageBackendKind, StorageSettings};

/// Central application struct.
pub struct App {
    pub storage: Arc<Storage>,
    pub settings_engine: SettingsEngine,
    pub projects: HistoryManager<ProjectHistoryEntry>,
    pub organizations: HistoryManager<OrganizationHistoryEntry>,
    pub enterprises: HistoryManager<EnterpriseHistoryEntry>,
}

/// Opens the persistent store selected by `settings`.
pub fn open_local_store(settings: &StorageSettings) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    match settings.backend {
        StorageBackendKind::Sqlite => {
            let path = settings
                .database_path
                .clone()
                .map(std::path::PathBuf::from)
                .unwrap_or_else(platform::default_database_path);
            log::info!("opening persistent storage at {}", path.display());
            Ok(Arc::new(SqliteStore::open(path)?))
        }
        StorageBackendKind::Memory => {
            log::info!("using in-memory persistent storage");
            let store = match settings.quota_bytes {
                Some(quota) => MemoryStore::with_quota(quota),
                None => MemoryStore::new(),
            };
            Ok(Arc::new(store))
        }
    }
}

impl App {
    /// Loads settings from `config_path` (or the platform default) and opens
    /// the storage they select.
    ///
    /// A malformed settings file is logged and replaced by defaults in memory.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        if let Err(e) = settings_engine.load() {
            log::warn!("{}; falling back to default settings", e);
        }
        Ok(Self::from_engine(settings_engine)?)
    }

    /// Opens the storage selected by an already loaded settings engine.
    pub fn from_engine(settings_engine: SettingsEngine) -> Result<Self, StorageError> {
        let local = open_local_store(&settings_engine.get_settings().storage)?;
        let storage = Arc::new(Storage::new(local));
        Ok(Self::with_storage(settings_engine, storage))
    }

    /// Wires the managers over an existing storage handle.
    pub fn with_storage(settings_engine: SettingsEngine, storage: Arc<Storage>) -> Self {
        Self {
            projects: project_history(Arc::clone(&storage)),
            organizations: organization_history(Arc::clone(&storage)),
            enterprises: enterprise_history(Arc::clone(&storage)),
            storage,
            settings_engine,
        }
    }
}
