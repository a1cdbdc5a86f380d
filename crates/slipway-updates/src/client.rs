//! Update API trait and HTTP client

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, UpdateApiError};
use crate::types::{InsertReleaseParams, ReleaseParams};

/// The external update-distribution API.
///
/// Each call is best-effort; repeated calls with identical parameters are
/// assumed idempotent but not guaranteed to be.
#[async_trait::async_trait]
pub trait UpdateApi: Send + Sync {
    /// Insert or refresh the release data for a version
    async fn insert_release_data(&self, params: &InsertReleaseParams) -> Result<()>;

    /// Update the release notes for a version
    async fn update_release_notes(&self, params: &ReleaseParams) -> Result<()>;

    /// Publish a release to end users
    async fn publish_release(&self, params: &ReleaseParams) -> Result<()>;
}

/// Update API backed by an HTTP service
pub struct HttpUpdateApi {
    client: Client,
    base_url: String,
}

impl HttpUpdateApi {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, params: &T) -> Result<()> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "update API call");

        let response = self.client.post(&url).json(params).send().await?;
        if !response.status().is_success() {
            return Err(UpdateApiError::Api {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UpdateApi for HttpUpdateApi {
    async fn insert_release_data(&self, params: &InsertReleaseParams) -> Result<()> {
        self.post("release/data", params).await?;
        info!(version = %params.release.release_version, "release data registered");
        Ok(())
    }

    async fn update_release_notes(&self, params: &ReleaseParams) -> Result<()> {
        self.post("release/notes", params).await?;
        info!(version = %params.release_version, "release notes updated");
        Ok(())
    }

    async fn publish_release(&self, params: &ReleaseParams) -> Result<()> {
        self.post("release/publish", params).await?;
        info!(version = %params.release_version, "release published");
        Ok(())
    }
}
