//! Error types for Slipway

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SlipwayError
pub type Result<T> = std::result::Result<T, SlipwayError>;

/// Main error type for Slipway operations
#[derive(Debug, Error)]
pub enum SlipwayError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Catalog-related errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Tag does not match the expected version shape
    #[error("Invalid release tag '{0}'")]
    InvalidTag(String),
}

/// Catalog-related errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Persisted catalog document does not parse
    #[error("Catalog document is corrupt: {0}")]
    Corrupt(String),

    /// A record for this tag already exists
    #[error("Release {0} already exists in the catalog")]
    DuplicateTag(String),

    /// Record expected but absent
    #[error("No release found for tag {0}")]
    RecordNotFound(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlipwayError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
