use super::{ByteSize, ByteSizeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DATA_FILE: &str = "DATA_FILE";
pub const ENV_DATA_FILE_MAX_SIZE: &str = "DATA_FILE_MAX_SIZE";

/// Storage configuration, persisted as TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the redb data file.
    pub data_file: PathBuf,
    /// Size at which the data file stops accepting new timers.
    pub max_size: ByteSize,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data.db"),
            max_size: ByteSize::mebibytes(100),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides fields from `DATA_FILE` and `DATA_FILE_MAX_SIZE`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::apply_env`] with a caller-supplied variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(data_file) = lookup(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(max_size) = lookup(ENV_DATA_FILE_MAX_SIZE) {
            self.max_size = max_size
                .parse::<ByteSize>()
                .map_err(|source| ConfigError::Env {
                    name: ENV_DATA_FILE_MAX_SIZE,
                    source,
                })?;
        }
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.data_file.as_os_str().is_empty() {
            errors.push("data_file must not be empty".to_string());
        }

        if self.backend == Backend::Redb && self.max_size.bytes() == 0 {
            errors.push("max_size must be at least 1B".to_string());
        }

        errors
    }
}

/// Which storage implementation to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Size-bounded redb file.
    #[default]
    Redb,
    /// Process memory only. Nothing survives a restart and there is no size bound.
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Redb => write!(f, "redb"),
            Backend::Memory => write!(f, "memory"),
        }
    }
}

/// Errors that can occur when loading config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {name}: {source}")]
    Env {
        name: &'static str,
        source: ByteSizeError,
    },
}
