//! Centralized configuration paths for floatpane
//!
//! All files live under:
//! - Unix/macOS: `~/.config/floatpane/`
//! - Windows: `%APPDATA%\floatpane\`
//!
//! This module is the single source of truth for on-disk locations.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "floatpane";

/// Base config directory for floatpane
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/floatpane`
///   - Else: `~/.config/floatpane`
///
/// Windows:
///   - `%APPDATA%\floatpane`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/floatpane/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/floatpane/<storage_key>.json`
///
/// The storage key is sanitized so arbitrary host-chosen keys cannot
/// escape the config directory.
pub fn state_file(storage_key: &str) -> Option<PathBuf> {
    let name = crate::util::slugify(storage_key);
    config_dir().map(|dir| dir.join(format!("{}.json", name)))
}

/// `~/.config/floatpane/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
