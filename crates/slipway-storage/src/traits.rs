//! Store traits
//!
//! The pipeline talks to two stores: the deploy store receiving the
//! catalog document and uploaded archives, and the artifact store the
//! built release archives are read from.

use tokio::io::AsyncRead;

use crate::error::Result;

/// A boxed byte stream read from or written to a store
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Destination store for the catalog document and uploaded artifacts
#[async_trait::async_trait]
pub trait DeployStore: Send + Sync {
    /// Read an object in full
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Write an object, replacing any existing content atomically
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Write an object from a byte stream
    async fn write_stream(&self, path: &str, stream: ByteStream) -> Result<()>;
}

/// Source store holding the built release archives
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Open an artifact for streamed reading
    async fn read_stream(&self, name: &str) -> Result<ByteStream>;

    /// Size of an artifact in bytes
    async fn size(&self, name: &str) -> Result<u64>;
}
