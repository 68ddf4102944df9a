use serde::{Deserialize, Serialize};

/// An entry that can live in a history list, identified by a string key.
pub trait HasKey {
    fn key(&self) -> &str;
}

/// A recently visited project, portfolio, or application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHistoryEntry {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Component qualifier such as `TRK`, `VW` or `APP`.
    pub qualifier: String,
}

impl HasKey for ProjectHistoryEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

/// A recently visited organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationHistoryEntry {
    pub key: String,
    pub name: String,
}

impl HasKey for OrganizationHistoryEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

/// A recently visited enterprise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseHistoryEntry {
    pub key: String,
    pub name: String,
}

impl HasKey for EnterpriseHistoryEntry {
    fn key(&self) -> &str {
        &self.key
    }
}
