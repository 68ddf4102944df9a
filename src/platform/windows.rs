// Windows paths
// Config and data: %APPDATA%\RecentHistory

use std::env;
use std::path::PathBuf;

fn app_data_dir() -> PathBuf {
    let base = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(base).join("RecentHistory")
}

pub fn get_config_dir() -> PathBuf {
    app_data_dir()
}

pub fn get_data_dir() -> PathBuf {
    app_data_dir()
}
