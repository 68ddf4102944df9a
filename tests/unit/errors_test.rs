use recent_history::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::Unavailable("storage is disabled".to_string()).to_string(),
        "Storage unavailable: storage is disabled"
    );
    assert_eq!(
        StorageError::QuotaExceeded("sonar_recent_history".to_string()).to_string(),
        "Storage quota exceeded while writing: sonar_recent_history"
    );
}

#[test]
fn storage_error_from_rusqlite_is_unavailable() {
    let err: StorageError = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, StorageError::Unavailable(_)));
}

#[test]
fn storage_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> =
        Box::new(StorageError::Unavailable("gone".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("a.b".to_string()).to_string(),
        "Invalid settings key: a.b"
    );
    assert_eq!(
        SettingsError::InvalidValue("not a number".to_string()).to_string(),
        "Invalid settings value: not a number"
    );
}
