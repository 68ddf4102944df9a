// recent-history platform paths
// Selects the per-OS config and data directories at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// File name of the persistent storage database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "recent_history.db";

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/recent-history` (or `$XDG_CONFIG_HOME/recent-history`)
/// - **macOS**: `~/Library/Application Support/RecentHistory`
/// - **Windows**: `%APPDATA%/RecentHistory`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/recent-history` (or `$XDG_DATA_HOME/recent-history`)
/// - **macOS**: `~/Library/Application Support/RecentHistory`
/// - **Windows**: `%APPDATA%/RecentHistory`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the persistent storage database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE_NAME)
}

/// Default location of the settings file.
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE_NAME)
}
