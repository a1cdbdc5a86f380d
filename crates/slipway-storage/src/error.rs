//! Storage error types

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object not found in the store
    #[error("Not found in store: {0}")]
    NotFound(String),

    /// Upload failed
    #[error("Upload to {path} failed: {reason}")]
    UploadFailed { path: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
