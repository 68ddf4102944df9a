//! RPC method handler for the recent-history JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method call to the storage adapter, the
//! history managers, or the settings engine held by the `App`.

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::storage_adapter::StorageAdapterTrait;
use crate::types::history::HasKey;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

/// The `value` of a save: absent or `null` means "remove", any other
/// non-string is rejected.
fn value_param(params: &Value) -> Result<Option<&str>, String> {
    match params.get("value") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.as_str())),
        Some(_) => Err("invalid value".to_string()),
    }
}

/// Runs one history list action (`get`, `add`, `remove`, `set`, `clear`).
fn handle_history<T>(
    mgr: &HistoryManager<T>,
    method: &str,
    action: &str,
    params: &Value,
) -> Result<Value, String>
where
    T: HasKey + Serialize + DeserializeOwned,
{
    match action {
        "get" => serde_json::to_value(mgr.get()).map_err(|e| e.to_string()),
        "add" => {
            let raw = params.get("entry").cloned().ok_or("missing entry")?;
            let entry: T =
                serde_json::from_value(raw).map_err(|e| format!("invalid entry: {}", e))?;
            mgr.add(entry);
            Ok(json!({"ok": true}))
        }
        "remove" => {
            let key = str_param(params, "key")?;
            mgr.remove(key);
            Ok(json!({"ok": true}))
        }
        "set" => {
            let raw = params.get("entries").cloned().ok_or("missing entries")?;
            let entries: Vec<T> =
                serde_json::from_value(raw).map_err(|e| format!("invalid entries: {}", e))?;
            mgr.set(&entries);
            Ok(json!({"ok": true}))
        }
        "clear" => {
            mgr.clear();
            Ok(json!({"ok": true}))
        }
        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    // ─── History lists ───
    if let Some(rest) = method.strip_prefix("history.") {
        let (list, action) = rest
            .split_once('.')
            .ok_or_else(|| format!("unknown method: {}", method))?;
        let a = app.lock().map_err(|e| e.to_string())?;
        return match list {
            "projects" => handle_history(&a.projects, method, action, params),
            "organizations" => handle_history(&a.organizations, method, action, params),
            "enterprises" => handle_history(&a.enterprises, method, action, params),
            _ => Err(format!("unknown method: {}", method)),
        };
    }

    match method {
        // ─── Local storage ───
        "storage.get" => {
            let key = str_param(params, "key")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let value = a.storage.get(key, opt_str_param(params, "suffix"));
            Ok(json!({"value": value}))
        }
        "storage.save" => {
            let key = str_param(params, "key")?;
            let value = value_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.storage.save(key, value, opt_str_param(params, "suffix"));
            Ok(json!({"ok": true}))
        }
        "storage.remove" => {
            let key = str_param(params, "key")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.storage.remove(key, opt_str_param(params, "suffix"));
            Ok(json!({"ok": true}))
        }

        // ─── Session storage ───
        "session.get" => {
            let key = str_param(params, "key")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let value = a.storage.session_get(key, opt_str_param(params, "suffix"));
            Ok(json!({"value": value}))
        }
        "session.save" => {
            let key = str_param(params, "key")?;
            let value = value_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.storage.session_save(key, value, opt_str_param(params, "suffix"));
            Ok(json!({"ok": true}))
        }
        "session.remove" => {
            let key = str_param(params, "key")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            a.storage.session_remove(key, opt_str_param(params, "suffix"));
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
