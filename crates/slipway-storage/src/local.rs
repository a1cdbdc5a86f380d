//! Local-disk store implementations

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, StorageError};
use crate::traits::{ArtifactStore, ByteStream, DeployStore};

/// Deploy store rooted at a local directory
pub struct LocalDeployStore {
    root: PathBuf,
}

impl LocalDeployStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    async fn prepare_target(&self, path: &str) -> Result<(PathBuf, PathBuf)> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Replacement stays atomic: content lands in a sibling temp file
        // that is renamed over the target.
        let temp = target.with_extension(match target.extension() {
            Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
            None => "tmp".to_string(),
        });
        Ok((target, temp))
    }
}

#[async_trait::async_trait]
impl DeployStore for LocalDeployStore {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let target = self.resolve(path);
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let (target, temp) = self.prepare_target(path).await?;
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &target).await?;
        debug!(path, bytes = bytes.len(), "deploy store write");
        Ok(())
    }

    async fn write_stream(&self, path: &str, mut stream: ByteStream) -> Result<()> {
        let (target, temp) = self.prepare_target(path).await?;
        let mut file = tokio::fs::File::create(&temp).await?;
        let written = tokio::io::copy(&mut stream, &mut file).await?;
        file.sync_all().await?;
        tokio::fs::rename(&temp, &target).await?;
        debug!(path, bytes = written, "deploy store stream write");
        Ok(())
    }
}

/// Artifact store rooted at a local directory
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    async fn open(&self, name: &str) -> Result<tokio::fs::File> {
        let path = self.resolve(name);
        match tokio::fs::File::open(&path).await {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn read_stream(&self, name: &str) -> Result<ByteStream> {
        let file = self.open(name).await?;
        Ok(Box::new(file))
    }

    async fn size(&self, name: &str) -> Result<u64> {
        let file = self.open(name).await?;
        Ok(file.metadata().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let store = LocalDeployStore::new(temp.path());

        store.write("_meta/releases.json", b"{}").await.unwrap();
        let bytes = store.read("_meta/releases.json").await.unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[tokio::test]
    async fn test_write_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let store = LocalDeployStore::new(temp.path());

        store.write("file.txt", b"first").await.unwrap();
        store.write("file.txt", b"second").await.unwrap();
        assert_eq!(store.read("file.txt").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_missing_object() {
        let temp = TempDir::new().unwrap();
        let store = LocalDeployStore::new(temp.path());

        let err = store.read("absent.json").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_write_stream() {
        let temp = TempDir::new().unwrap();
        let deploy = LocalDeployStore::new(temp.path().join("deploy"));
        let artifacts = LocalArtifactStore::new(temp.path().join("artifacts"));

        std::fs::create_dir_all(temp.path().join("artifacts")).unwrap();
        std::fs::write(temp.path().join("artifacts/install.zip"), b"archive bytes").unwrap();

        let stream = artifacts.read_stream("install.zip").await.unwrap();
        deploy.write_stream("sw6/install.zip", stream).await.unwrap();

        assert_eq!(
            deploy.read("sw6/install.zip").await.unwrap(),
            b"archive bytes"
        );
    }

    #[tokio::test]
    async fn test_artifact_size_and_stream() {
        let temp = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(temp.path());
        std::fs::write(temp.path().join("update.zip"), b"12345").unwrap();

        assert_eq!(store.size("update.zip").await.unwrap(), 5);

        let mut stream = store.read_stream("update.zip").await.unwrap();
        let mut content = Vec::new();
        stream.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"12345");
    }

    #[tokio::test]
    async fn test_artifact_missing() {
        let temp = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(temp.path());

        assert!(matches!(
            store.size("absent.zip").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }
}
