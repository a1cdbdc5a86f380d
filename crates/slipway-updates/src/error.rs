//! Update API error types

use thiserror::Error;

/// Update API errors
#[derive(Debug, Error)]
pub enum UpdateApiError {
    /// The API answered with a non-success status
    #[error("Update API call {endpoint} failed with status {status}")]
    Api { endpoint: String, status: u16 },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for update API operations
pub type Result<T> = std::result::Result<T, UpdateApiError>;
