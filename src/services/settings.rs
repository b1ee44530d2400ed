use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::model::settings::Settings;
use crate::services::dictionary::store;

pub const HOME_ENV: &str = "MACRO_CORE_HOME";
const APP_DIR: &str = "ArgonautsMacro";
const SETTINGS_FILE: &str = "settings.json";

pub fn app_dir() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join(APP_DIR);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Missing settings file means defaults.
pub fn load(dir: &Path) -> Result<Settings> {
    let path = settings_path(dir);
    if !path.exists() {
        return Ok(Settings::default());
    }

    let data = fs::read_to_string(&path).map_err(|e| CoreError::read(&path, e))?;
    serde_json::from_str::<Settings>(&data)
        .map_err(|e| CoreError::json(path.display().to_string(), e))
}

pub fn load_or_default(dir: &Path) -> Settings {
    match load(dir) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[settings] {e}; using defaults");
            Settings::default()
        }
    }
}

pub fn save(dir: &Path, settings: &Settings) -> Result<()> {
    let path = settings_path(dir);
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CoreError::json(path.display().to_string(), e))?;

    store::write_atomic(&path, json.as_bytes())?;
    log::debug!("[settings] saved {}", path.display());
    Ok(())
}
