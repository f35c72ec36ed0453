//! Common filesystem paths used by quarry.

use std::path::PathBuf;

/// Base directory for quarry state (config, default index, logs).
///
/// Defaults to `~/.quarry`, but can be overridden via `QUARRY_DIR` for
/// testing or multi-instance setups.
pub fn quarry_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUARRY_DIR") {
        return PathBuf::from(dir);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".quarry")
}

/// Path to the quarry configuration file.
pub fn config_path() -> PathBuf {
    quarry_dir().join("config.toml")
}

/// Default location of the serialized index.
pub fn default_index_path() -> PathBuf {
    quarry_dir().join("index.json")
}

/// Log file used by the TUI.
pub fn tui_log_path() -> PathBuf {
    quarry_dir().join("tui.log")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
