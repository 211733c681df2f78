//! Error types for loading page configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Extension is not one of `yaml`, `yml` or `json`.
    #[error("unsupported config format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    /// `calendar_start_day` must be 0 (Sunday) through 6 (Saturday).
    #[error("calendar start day {0} is out of range (0-6)")]
    InvalidStartDay(u8),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
