//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/srdm/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/srdm/` (~/.config/srdm/)
//! - State/Logs: `$XDG_STATE_HOME/srdm/` (~/.local/state/srdm/)
//!
//! The catalog itself lives under `$HOME/Data/SRDM/` unless overridden.

use crate::error::{Error, Result};
use crate::types::DEFAULT_ENGINE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the catalog location
pub const DATA_REPO_ENV: &str = "SRDM_DATA_REPO_PATH";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Catalog storage configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults applied when inserting new entries
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Catalog storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Catalog file location (overridden by `SRDM_DATA_REPO_PATH` and `--path`)
    pub path: Option<PathBuf>,

    /// How long to wait on a locked catalog before failing, in milliseconds
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

fn default_busy_timeout() -> u64 {
    5000
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Defaults for new catalog entries
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Directory holding table data files when no path is given
    /// (`<data_dir>/<database>.sqlite`)
    pub data_dir: Option<PathBuf>,

    /// Engine label for new tables
    #[serde(default = "default_engine")]
    pub engine: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            engine: default_engine(),
        }
    }
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

impl DefaultsConfig {
    /// Data file location for a table in `database` when the caller gave none.
    ///
    /// `<data_dir>/<database>.sqlite`, with `data_dir` defaulting to
    /// `$HOME/DATA/DBMS`.
    pub fn table_data_path(&self, database: &str) -> PathBuf {
        let dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("DATA").join("DBMS"));
        dir.join(format!("{database}.sqlite"))
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Resolve the catalog file location.
    ///
    /// Priority: explicit override (the `--path` flag), then
    /// `SRDM_DATA_REPO_PATH`, then `[database].path`, then
    /// [`Config::default_database_path`].
    pub fn database_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Some(path) = std::env::var_os(DATA_REPO_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        self.database
            .path
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/srdm/config.toml` (~/.config/srdm/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("srdm").join("config.toml")
    }

    /// Returns the default catalog path
    ///
    /// `$HOME/Data/SRDM/srdm_dataRepo.sqlite`
    pub fn default_database_path() -> PathBuf {
        home_dir()
            .join("Data")
            .join("SRDM")
            .join("srdm_dataRepo.sqlite")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/srdm/` (~/.local/state/srdm/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("srdm")
    }

    /// Returns the log file path prefix
    ///
    /// `$XDG_STATE_HOME/srdm/srdm.log` (~/.local/state/srdm/srdm.log); the
    /// rotated files carry a date suffix.
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("srdm.log")
    }
}
