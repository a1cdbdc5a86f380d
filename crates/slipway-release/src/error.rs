//! Release preparation error types

use thiserror::Error;

use slipway_core::error::{CatalogError, VersionError};
use slipway_storage::StorageError;
use slipway_updates::UpdateApiError;

/// Errors aborting a preparation run
#[derive(Debug, Error)]
pub enum PrepareError {
    /// The tag does not parse as a release version
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Catalog load or save failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Artifact read or upload failed; nothing was persisted
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Registration with the update API failed after the catalog was
    /// already saved.
    ///
    /// The record is no longer public at this point, so re-running
    /// preparation for the same tag is safe and re-attempts registration.
    #[error("Release registration failed after catalog save: {0}")]
    Registration(#[source] UpdateApiError),
}

/// Result type for preparation operations
pub type Result<T> = std::result::Result<T, PrepareError>;
