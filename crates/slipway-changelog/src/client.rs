//! Changelog source trait and HTTP client

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::{ChangelogError, Result};

/// Source of per-locale changelog text for a release tag
#[async_trait::async_trait]
pub trait ChangelogSource: Send + Sync {
    /// Fetch the changelog for a tag, keyed by locale code
    async fn fetch(&self, tag: &str) -> Result<BTreeMap<String, String>>;
}

/// Changelog source backed by an HTTP service.
///
/// `GET <base_url>/changelog/<tag>` returning a JSON object mapping
/// locale codes to changelog text.
pub struct HttpChangelogSource {
    client: Client,
    base_url: String,
}

impl HttpChangelogSource {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl ChangelogSource for HttpChangelogSource {
    async fn fetch(&self, tag: &str) -> Result<BTreeMap<String, String>> {
        let url = format!("{}/changelog/{}", self.base_url, tag);
        debug!(%tag, %url, "fetching changelog");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ChangelogError::FetchFailed {
                tag: tag.to_string(),
                status: response.status().as_u16(),
            });
        }

        let locales: BTreeMap<String, String> = response.json().await?;
        info!(%tag, locales = locales.len(), "changelog fetched");
        Ok(locales)
    }
}
