//! The release preparation pipeline

use std::sync::Arc;

use tracing::{info, warn};

use slipway_catalog::{ReleaseCatalog, ReleaseRecord};
use slipway_changelog::ChangelogSource;
use slipway_core::config::Config;
use slipway_core::error::CatalogError;
use slipway_storage::{ArtifactStore, ArtifactUploader, DeployStore, StorageError};
use slipway_updates::{InsertReleaseParams, ReleaseParams, UpdateApi};
use slipway_versioning as versioning;

use crate::error::{PrepareError, Result};

/// Install archive name in the artifact store
const INSTALL_ARCHIVE: &str = "install.zip";
/// Update archive name in the artifact store
const UPDATE_ARCHIVE: &str = "update.zip";
/// Install tarball name in the artifact store
const INSTALL_TARBALL: &str = "install.tar.xz";

/// Terminal state of a preparation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The catalog was saved and the release registered
    Completed { tag: String },

    /// A guard refused the run before any side effect
    Rejected { tag: String, reason: RejectReason },
}

/// Why a preparation run was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The record is already public and therefore immutable here
    AlreadyPublic,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::AlreadyPublic => write!(f, "release is already public"),
        }
    }
}

/// Drives the end-to-end preparation of one release tag.
///
/// The catalog is loaded fresh at the start of every run and saved once
/// near the end; a failure before the save leaves the persisted document
/// untouched.
pub struct ReleasePrepareService {
    config: Config,
    deploy: Arc<dyn DeployStore>,
    artifacts: Arc<dyn ArtifactStore>,
    changelog: Arc<dyn ChangelogSource>,
    update_api: Arc<dyn UpdateApi>,
    uploader: ArtifactUploader,
}

impl ReleasePrepareService {
    /// Create a preparation service over the given collaborators
    pub fn new(
        config: Config,
        deploy: Arc<dyn DeployStore>,
        artifacts: Arc<dyn ArtifactStore>,
        changelog: Arc<dyn ChangelogSource>,
        update_api: Arc<dyn UpdateApi>,
    ) -> Self {
        let uploader = ArtifactUploader::new(
            deploy.clone(),
            artifacts.clone(),
            config.deploy.public_domain.clone(),
            config.release.namespace.clone(),
        );
        Self {
            config,
            deploy,
            artifacts,
            changelog,
            update_api,
            uploader,
        }
    }

    /// Prepare the release for `tag`.
    ///
    /// Creates or updates the catalog record, uploads the archives,
    /// merges changelog content where permitted, saves the catalog and
    /// registers the release with the update API.
    pub async fn prepare_release(&self, tag: &str) -> Result<PrepareOutcome> {
        // Malformed tags fail before any record is created or byte moved.
        versioning::display_version(tag)?;

        let mut catalog = self.load_catalog().await?;

        if catalog.find_by_tag(tag).is_none() {
            catalog.add_record(tag)?;
        }
        let record = catalog
            .find_by_tag_mut(tag)
            .ok_or_else(|| CatalogError::RecordNotFound(tag.to_string()))?;

        if record.is_public() {
            warn!(%tag, "release is already public, refusing to prepare");
            return Ok(PrepareOutcome::Rejected {
                tag: tag.to_string(),
                reason: RejectReason::AlreadyPublic,
            });
        }

        self.set_release_properties(tag, record)?;
        self.upload_archives(record).await?;

        if record.changelog_permitted() {
            match self.changelog.fetch(tag).await {
                Ok(locales) => record.merge_locales(locales),
                // Changelog content is optional before a branch
                // stabilizes; the run continues without it.
                Err(e) => {
                    warn!(%tag, error = %e, "changelog fetch failed, preparing without release notes")
                }
            }
        } else {
            info!(%tag, "changelog merge not permitted for this record");
        }

        // Sizes are read before the save so that everything after it is
        // registration only.
        let install_size = self.artifacts.size(INSTALL_ARCHIVE).await?;
        let update_size = self.artifacts.size(UPDATE_ARCHIVE).await?;

        self.store_catalog(&catalog).await?;

        let record = catalog
            .find_by_tag(tag)
            .ok_or_else(|| CatalogError::RecordNotFound(tag.to_string()))?;
        self.register_update(tag, record, install_size, update_size)
            .await?;

        info!(%tag, "release prepared");
        Ok(PrepareOutcome::Completed {
            tag: tag.to_string(),
        })
    }

    /// Load the catalog document from the deploy store.
    ///
    /// A missing document yields an empty catalog; an unparsable one is
    /// fatal.
    async fn load_catalog(&self) -> Result<ReleaseCatalog> {
        let path = &self.config.deploy.catalog_path;
        match self.deploy.read(path).await {
            Ok(bytes) => Ok(ReleaseCatalog::from_json(&bytes)?),
            Err(StorageError::NotFound(_)) => {
                warn!(path = %path, "no catalog document found, starting empty");
                Ok(ReleaseCatalog::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the full catalog document
    async fn store_catalog(&self, catalog: &ReleaseCatalog) -> Result<()> {
        let document = catalog.to_pretty_json()?;
        self.deploy
            .write(&self.config.deploy.catalog_path, document.as_bytes())
            .await?;
        info!(
            path = %self.config.deploy.catalog_path,
            releases = catalog.len(),
            "catalog saved"
        );
        Ok(())
    }

    /// Unconditionally reset the derived and operator-set fields
    fn set_release_properties(&self, tag: &str, record: &mut ReleaseRecord) -> Result<()> {
        let repository = &self.config.release.repository_url;

        record.minimum_version = self.config.release.minimum_version.clone();
        record.public = false;
        record.ea = false;
        record.revision = String::new();
        record.release_type = versioning::release_type(tag)?.to_string();
        record.release_date = String::new();
        record.tag = tag.to_string();
        record.github_repo = format!("{repository}/tree/{tag}");
        record.upgrade_md = format!(
            "{repository}/blob/{tag}/UPGRADE-{}.md",
            versioning::major_branch(tag)?
        );
        Ok(())
    }

    /// Upload the release archives and burn links and digests into the
    /// record.
    ///
    /// The tarball goes up twice: once content-addressed, once under the
    /// mutable per-branch alias that always points at the latest build.
    /// The four uploads are independent and run concurrently.
    async fn upload_archives(&self, record: &mut ReleaseRecord) -> Result<()> {
        let tag = record.tag.clone();
        let next_alias = format!(
            "{}/install_{}_next.tar.xz",
            self.config.release.namespace,
            versioning::minor_branch(&tag)?
        );

        let (install, update, _, _) = tokio::try_join!(
            self.uploader.hash_and_upload(&tag, INSTALL_ARCHIVE, None),
            self.uploader.hash_and_upload(&tag, UPDATE_ARCHIVE, None),
            self.uploader.hash_and_upload(&tag, INSTALL_TARBALL, None),
            self.uploader
                .hash_and_upload(&tag, INSTALL_TARBALL, Some(&next_alias)),
        )?;

        record.download_link_install = install.url;
        record.sha1_install = install.sha1;
        record.sha256_install = install.sha256;

        record.download_link_update = update.url;
        record.sha1_update = update.sha1;
        record.sha256_update = update.sha256;
        Ok(())
    }

    /// Register the prepared release with the update API
    async fn register_update(
        &self,
        tag: &str,
        record: &ReleaseRecord,
        install_size: u64,
        update_size: u64,
    ) -> Result<()> {
        let base = ReleaseParams {
            release_version: record.version.clone(),
            channel: versioning::update_channel(tag)?.to_string(),
            version_text: record.version_text.clone().filter(|t| !t.is_empty()),
        };

        let insert = InsertReleaseParams {
            release: base.clone(),
            min_version: self.config.release.minimum_version.clone(),
            install_uri: record.download_link_install.clone(),
            install_size,
            install_sha1: record.sha1_install.clone(),
            install_sha256: record.sha256_install.clone(),
            update_uri: record.download_link_update.clone(),
            update_size,
            update_sha1: record.sha1_update.clone(),
            update_sha256: record.sha256_update.clone(),
        };

        self.update_api
            .insert_release_data(&insert)
            .await
            .map_err(PrepareError::Registration)?;
        self.update_api
            .update_release_notes(&base)
            .await
            .map_err(PrepareError::Registration)?;

        // The publish call only fires for a public record. The property
        // reset above always clears the flag within this run, so the call
        // is reachable only if another actor toggled the record between
        // the save and this point; the conditional is kept for parity
        // with the catalog state at registration time.
        if record.is_public() {
            self.update_api
                .publish_release(&base)
                .await
                .map_err(PrepareError::Registration)?;
        }
        Ok(())
    }
}
