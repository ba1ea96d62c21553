//! Unified configuration file.
//!
//! One TOML document carries a table per library:
//!
//! ```toml
//! [log]
//! color = "never"
//! min_level = "info"
//!
//! [timer]
//! unit = "us"
//!
//! [timer.bench]
//! samples = 16
//!
//! [mini]
//! timestamp = true
//! ```
//!
//! Missing tables and keys fall back to their defaults; unknown keys are
//! rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use warp_log::LogConfig;
use warp_mini::MiniConfig;
use warp_timer::TimerConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "WARP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarpConfig {
    pub log: LogConfig,
    pub timer: TimerConfig,
    pub mini: MiniConfig,
}

impl WarpConfig {
    /// Reads and parses the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads the file named by `WARP_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`WarpConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(CONFIG_ENV).filter(|path| !path.is_empty()) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `WARP_LOG_LEVEL` and `NO_COLOR` to the log settings.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.log = self.log.with_env_overrides();
        self
    }

    /// Pushes the log settings into the global console and replaces the
    /// global mini configuration.
    pub fn apply(&self) {
        self.log.apply();
        warp_mini::set_config(self.mini.clone());
    }
}
