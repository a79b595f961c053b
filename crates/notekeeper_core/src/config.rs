//! Startup configuration.
//!
//! # Responsibility
//! - Describe where the notes file lives and how logging is set up.
//! - Read environment overrides once, at process start.
//!
//! # Invariants
//! - Configuration is an explicit value handed to components; there is no
//!   process-wide mutable config.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "notes";
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

const ENV_DATA_DIR: &str = "NOTEKEEPER_DATA_DIR";
const ENV_LOG_LEVEL: &str = "NOTEKEEPER_LOG_LEVEL";
const ENV_LOG_DIR: &str = "NOTEKEEPER_LOG_DIR";

/// Location of the notes file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the notes file. Created on initialization.
    pub data_dir: PathBuf,
    /// File name inside `data_dir`.
    pub file_name: String,
}

impl StorageConfig {
    /// Uses `data_dir` with the default `notes.json` file name.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_NOTES_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Whole-application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Builds configuration from `NOTEKEEPER_*` environment variables.
    ///
    /// Unset or blank variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(data_dir) = read(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(data_dir);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        config
    }
}
