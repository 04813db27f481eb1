//! Configuration for stationlog.
//!
//! Read from `--config <path>` when given, otherwise from
//! `~/.config/stationlog/config.toml` if that file exists. A CGI process has
//! no business writing into a home directory, so a missing file just means
//! defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "gemini://station.martinrue.com/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix the user name is appended to (default: station.martinrue.com)
    pub base_url: String,

    /// Upper bound on the whole page fetch in seconds (default: 2)
    pub timeout_secs: u64,

    /// Serve pages from capsules whose certificate has expired (default: false)
    pub accept_expired_certificates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 2,
            accept_expired_certificates: false,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/stationlog/config.toml`, when a config directory exists.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stationlog").join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
