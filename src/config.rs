//! Configuration: optional TOML file plus command-line overrides
//!
//! The default file lives in the OS-standard config directory:
//! - Linux: `$XDG_CONFIG_HOME/tileline/tileline.toml`
//! - macOS: `~/Library/Application Support/tileline/tileline.toml`
//!
//! ```toml
//! catalog = "/path/to/tiles.json"
//! seed = 42
//! log_filter = "tileline=debug"
//! log_file = "/tmp/tileline.log"
//! ```

use derive_more::{Display, Error};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "tileline";
const CONFIG_FILE: &str = "tileline.toml";
const LOG_FILE: &str = "tileline.log";
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("could not read config file {path}: {message}")]
    Read { path: String, message: String },
    #[display("invalid config file {path}: {message}")]
    Parse { path: String, message: String },
    #[display("could not determine data directory")]
    NoDataDirectory,
}

/// Settings. Every field is optional; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Custom tile catalog (JSON); the embedded standard set when unset
    pub catalog: Option<PathBuf>,
    /// Seed for reproducible deals
    pub seed: Option<u64>,
    /// `tracing` filter directive, e.g. `info` or `tileline=debug`
    pub log_filter: Option<String>,
    /// Where to write the log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly named file must exist. The default file is optional and
    /// a missing one yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading config");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Layer `overrides` on top: any field set there wins.
    pub fn merge(self, overrides: Config) -> Self {
        Self {
            catalog: overrides.catalog.or(self.catalog),
            seed: overrides.seed.or(self.seed),
            log_filter: overrides.log_filter.or(self.log_filter),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    /// Filter directive for the log subscriber.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log file path: the configured one, or `tileline.log` in the data dir.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join(LOG_FILE))
            .ok_or(ConfigError::NoDataDirectory)
    }
}
