//! Error types for reading settings files

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while seeding configuration from disk
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for the record
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Inline JSON is not valid for the record
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration seeding
pub type ConfigResult<T> = Result<T, ConfigError>;
