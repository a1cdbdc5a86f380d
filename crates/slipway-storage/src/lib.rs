//! Slipway Storage - Storage abstraction and artifact upload
//!
//! This crate provides the deploy/artifact store seams and the
//! hash-and-upload step that publishes release archives under
//! content-addressed destination paths.

mod error;
mod local;
mod traits;
mod upload;

pub use error::{Result, StorageError};
pub use local::{LocalArtifactStore, LocalDeployStore};
pub use traits::{ArtifactStore, ByteStream, DeployStore};
pub use upload::{ArtifactUploader, UploadedArtifact};
