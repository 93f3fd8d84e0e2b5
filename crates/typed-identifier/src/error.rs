//! Error types for typed-identifier

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for loading and running migrations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record decoding or output encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a field settings store.
///
/// The policy resolver never surfaces these: any lookup error resolves to
/// an empty allow-list with the generic fallback disallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed field config {id}: {reason}")]
    Malformed { id: String, reason: String },
}

/// Errors loading migration or field settings configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown process plugin '{plugin}' for field {field}")]
    UnknownPlugin { field: String, plugin: String },

    #[error("Process mapping for field {0} has no source")]
    MissingSource(String),
}
