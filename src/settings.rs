//! Explorer settings and their TOML persistence.
//!
//! The core components only ever read a [`Settings`] value the presenter
//! threads into each call; nothing in this crate holds a global settings
//! instance. Persistence lives here so every embedder stores the same
//! `settings.toml` under the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Filename used to store explorer settings.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Process-wide explorer preferences.
///
/// Config keys (TOML): `show_hidden`, `max_history_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Show entries whose name starts with a dot.
    #[serde(default = "default_show_hidden")]
    pub show_hidden: bool,
    /// Bound for each of the back and forward history stacks.
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,
}

impl Settings {
    /// Restore the factory defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hidden: default_show_hidden(),
            max_history_size: default_max_history_size(),
        }
    }
}

fn default_show_hidden() -> bool {
    false
}

fn default_max_history_size() -> usize {
    15
}

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable config directory available for settings")]
    NoConfigDir,
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the settings file.
    #[error("Invalid settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize settings to TOML.
    #[error("Failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Resolve the settings file path, ensuring the app directory exists.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(SETTINGS_FILE_NAME))
}

/// Load settings from the app directory, falling back to defaults when
/// the file is missing.
pub fn load_or_default() -> Result<Settings, ConfigError> {
    load_from(&settings_path()?)
}

/// Persist `settings` into the app directory.
pub fn save(settings: &Settings) -> Result<(), ConfigError> {
    save_to(settings, &settings_path()?)
}

/// Load settings from an explicit path; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist `settings` to an explicit path.
pub fn save_to(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
