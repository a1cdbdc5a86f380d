//! Artifact hashing and upload

use std::sync::Arc;

use sha1::Sha1;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::traits::{ArtifactStore, DeployStore};

const CHUNK_SIZE: usize = 64 * 1024;

/// Result of hashing and uploading one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    /// Public URL the artifact is reachable at
    pub url: String,

    /// SHA-1 digest of the uploaded bytes, hex encoded
    pub sha1: String,

    /// SHA-256 digest of the uploaded bytes, hex encoded
    pub sha256: String,
}

/// Hashes release archives and uploads them to the deploy store.
///
/// Without an explicit target the destination path embeds the content
/// hash, so re-uploading identical bytes for a tag is idempotent. An
/// explicit target is a mutable alias and gets overwritten in place.
pub struct ArtifactUploader {
    deploy: Arc<dyn DeployStore>,
    artifacts: Arc<dyn ArtifactStore>,
    public_domain: String,
    namespace: String,
}

impl ArtifactUploader {
    /// Create an uploader publishing under `public_domain`/`namespace`
    pub fn new(
        deploy: Arc<dyn DeployStore>,
        artifacts: Arc<dyn ArtifactStore>,
        public_domain: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            deploy,
            artifacts,
            public_domain: public_domain.into(),
            namespace: namespace.into(),
        }
    }

    /// Hash a source artifact and upload it.
    ///
    /// Digests are computed incrementally over one streamed read; a second
    /// streamed read feeds the upload, since the content-addressed
    /// destination path is not known until the SHA-1 is.
    pub async fn hash_and_upload(
        &self,
        tag: &str,
        source: &str,
        target: Option<&str>,
    ) -> Result<UploadedArtifact> {
        let (sha1, sha256) = self.digest(source).await?;

        let path = match target {
            Some(explicit) => explicit.to_string(),
            None => content_path(&self.namespace, tag, source, &sha1),
        };

        let stream = self
            .artifacts
            .read_stream(source)
            .await
            .map_err(|e| upload_failed(&path, e))?;
        self.deploy
            .write_stream(&path, stream)
            .await
            .map_err(|e| upload_failed(&path, e))?;

        info!(%tag, source, %path, "artifact uploaded");
        Ok(UploadedArtifact {
            url: format!("{}/{}", self.public_domain, path),
            sha1,
            sha256,
        })
    }

    /// Compute SHA-1 and SHA-256 over one streamed pass of the artifact
    async fn digest(&self, source: &str) -> Result<(String, String)> {
        let mut stream = self.artifacts.read_stream(source).await?;
        let mut sha1 = Sha1::new();
        let mut sha256 = Sha256::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            sha1.update(&chunk[..read]);
            sha256.update(&chunk[..read]);
        }

        let sha1 = format!("{:x}", sha1.finalize());
        let sha256 = format!("{:x}", sha256.finalize());
        debug!(source, %sha1, "artifact hashed");
        Ok((sha1, sha256))
    }
}

fn upload_failed(path: &str, source: StorageError) -> StorageError {
    StorageError::UploadFailed {
        path: path.to_string(),
        reason: source.to_string(),
    }
}

/// Content-addressed destination path for an artifact.
///
/// The basename splits at its first dot, so multi-part extensions
/// survive: `install.tar.xz` for tag `6.4.5` becomes
/// `<namespace>/install_6.4.5_<sha1>.tar.xz`.
pub fn content_path(namespace: &str, tag: &str, source: &str, sha1: &str) -> String {
    let basename = source.rsplit('/').next().unwrap_or(source);
    match basename.split_once('.') {
        Some((stem, extension)) => {
            format!("{namespace}/{stem}_{tag}_{sha1}.{extension}")
        }
        None => format!("{namespace}/{basename}_{tag}_{sha1}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::{LocalArtifactStore, LocalDeployStore};
    use tempfile::TempDir;

    const HELLO_SHA1: &str = "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed";
    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn uploader(temp: &TempDir) -> (ArtifactUploader, Arc<LocalDeployStore>) {
        let deploy = Arc::new(LocalDeployStore::new(temp.path().join("deploy")));
        let artifacts = Arc::new(LocalArtifactStore::new(temp.path().join("artifacts")));
        std::fs::create_dir_all(temp.path().join("artifacts")).unwrap();
        (
            ArtifactUploader::new(
                deploy.clone(),
                artifacts,
                "https://releases.example.com",
                "sw6",
            ),
            deploy,
        )
    }

    #[test]
    fn test_content_path_shape() {
        assert_eq!(
            content_path("sw6", "6.4.5", "install.zip", "abc123"),
            "sw6/install_6.4.5_abc123.zip"
        );
        assert_eq!(
            content_path("sw6", "6.4.5", "install.tar.xz", "abc123"),
            "sw6/install_6.4.5_abc123.tar.xz"
        );
    }

    #[test]
    fn test_content_path_uses_basename() {
        assert_eq!(
            content_path("sw6", "6.4.5", "nightly/install.zip", "abc123"),
            "sw6/install_6.4.5_abc123.zip"
        );
    }

    #[tokio::test]
    async fn test_hash_and_upload_content_addressed() {
        let temp = TempDir::new().unwrap();
        let (uploader, deploy) = uploader(&temp);
        std::fs::write(temp.path().join("artifacts/install.zip"), b"hello world").unwrap();

        let uploaded = uploader
            .hash_and_upload("6.4.5", "install.zip", None)
            .await
            .unwrap();

        assert_eq!(uploaded.sha1, HELLO_SHA1);
        assert_eq!(uploaded.sha256, HELLO_SHA256);
        assert_eq!(
            uploaded.url,
            format!("https://releases.example.com/sw6/install_6.4.5_{HELLO_SHA1}.zip")
        );

        let stored = deploy
            .read(&format!("sw6/install_6.4.5_{HELLO_SHA1}.zip"))
            .await
            .unwrap();
        assert_eq!(stored, b"hello world");
    }

    #[tokio::test]
    async fn test_identical_bytes_yield_identical_path() {
        let temp = TempDir::new().unwrap();
        let (uploader, _deploy) = uploader(&temp);
        std::fs::write(temp.path().join("artifacts/install.zip"), b"hello world").unwrap();

        let first = uploader
            .hash_and_upload("6.4.5", "install.zip", None)
            .await
            .unwrap();
        let second = uploader
            .hash_and_upload("6.4.5", "install.zip", None)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_explicit_target_overwrites_alias() {
        let temp = TempDir::new().unwrap();
        let (uploader, deploy) = uploader(&temp);
        let alias = "sw6/install_6.4_next.tar.xz";

        std::fs::write(temp.path().join("artifacts/install.tar.xz"), b"build one").unwrap();
        uploader
            .hash_and_upload("6.4.5", "install.tar.xz", Some(alias))
            .await
            .unwrap();

        std::fs::write(temp.path().join("artifacts/install.tar.xz"), b"build two").unwrap();
        let uploaded = uploader
            .hash_and_upload("6.4.6", "install.tar.xz", Some(alias))
            .await
            .unwrap();

        assert_eq!(
            uploaded.url,
            "https://releases.example.com/sw6/install_6.4_next.tar.xz"
        );
        assert_eq!(deploy.read(alias).await.unwrap(), b"build two");
    }

    #[tokio::test]
    async fn test_missing_artifact_is_an_error() {
        let temp = TempDir::new().unwrap();
        let (uploader, _deploy) = uploader(&temp);

        let err = uploader
            .hash_and_upload("6.4.5", "install.zip", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
