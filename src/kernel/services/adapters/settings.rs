//! Bridge config file + per-OS directories.
//!
//! - config: `<cache>/.htom/bridge.json` unless a path is given explicitly
//! - logs: `<data>/htom/logs`

use std::path::{Path, PathBuf};

use crate::kernel::services::ports::BridgeConfig;

pub const CONFIG_ENV: &str = "HTOM_BRIDGE_CONFIG";

const SETTINGS_DIR: &str = ".htom";
const SETTINGS_FILE: &str = "bridge.json";
const APP_NAME: &str = "htom";
const LOG_DIR: &str = "logs";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no config path given and no cache directory found")]
    NoConfigPath,
}

pub fn get_config_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Explicit argument, then `HTOM_BRIDGE_CONFIG`, then the cache dir default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    get_config_path().ok_or(ConfigError::NoConfigPath)
}

pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: BridgeConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), core = %config.core_location, "config loaded");
    Ok(config)
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseDir {
    Cache,
    Data,
}

fn get_cache_dir() -> Option<PathBuf> {
    base_dir(BaseDir::Cache, process_env)
}

fn get_app_data_dir() -> Option<PathBuf> {
    base_dir(BaseDir::Data, process_env).map(|dir| dir.join(APP_NAME))
}

fn process_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Per-user base directory, resolved through `env` so lookups stay testable.
///
/// | | cache | data |
/// |---|---|---|
/// | macOS | `~/Library/Caches` | `~/Library/Application Support` |
/// | Windows | `%LOCALAPPDATA%`, else `%APPDATA%` | `%APPDATA%` |
/// | other unix | `$XDG_CACHE_HOME`, else `~/.cache` | `$XDG_DATA_HOME`, else `~/.local/share` |
fn base_dir(kind: BaseDir, env: impl Fn(&str) -> Option<PathBuf>) -> Option<PathBuf> {
    let home = || env("HOME");
    if cfg!(target_os = "macos") {
        let sub = match kind {
            BaseDir::Cache => "Library/Caches",
            BaseDir::Data => "Library/Application Support",
        };
        home().map(|home| home.join(sub))
    } else if cfg!(windows) {
        match kind {
            BaseDir::Cache => env("LOCALAPPDATA").or_else(|| env("APPDATA")),
            BaseDir::Data => env("APPDATA"),
        }
    } else if cfg!(unix) {
        let (xdg, fallback) = match kind {
            BaseDir::Cache => ("XDG_CACHE_HOME", ".cache"),
            BaseDir::Data => ("XDG_DATA_HOME", ".local/share"),
        };
        env(xdg).or_else(|| home().map(|home| home.join(fallback)))
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
