//! Changelog error types

use thiserror::Error;

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The changelog service answered with a non-success status
    #[error("Changelog fetch for {tag} failed with status {status}")]
    FetchFailed { tag: String, status: u16 },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, ChangelogError>;
