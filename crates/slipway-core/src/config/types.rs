//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Slipway
///
/// Every value the pipeline reads comes from this structure; nothing is
/// pulled from the process environment at run time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deploy store configuration
    pub deploy: DeployConfig,

    /// Artifact source configuration
    pub artifacts: ArtifactsConfig,

    /// Release metadata configuration
    pub release: ReleaseConfig,

    /// Changelog source configuration
    pub changelog: ChangelogConfig,

    /// Update API configuration
    pub update_api: UpdateApiConfig,
}

/// Deploy store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Root directory of the deploy store
    pub root: PathBuf,

    /// Public domain prefixed to uploaded artifact paths
    pub public_domain: String,

    /// Path of the catalog document inside the deploy store
    pub catalog_path: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./deploy"),
            public_domain: "https://releases.example.com".to_string(),
            catalog_path: "_meta/releases.json".to_string(),
        }
    }
}

/// Artifact source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding the built release archives
    pub root: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./artifacts"),
        }
    }
}

/// Release metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Minimum version required to update to a prepared release
    pub minimum_version: String,

    /// Namespace directory for uploaded artifacts
    pub namespace: String,

    /// Source repository URL, used for tree and upgrade-notes links
    pub repository_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            minimum_version: "6.2.0".to_string(),
            namespace: "sw6".to_string(),
            repository_url: "https://github.com/example/platform".to_string(),
        }
    }
}

/// Changelog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Base URL of the changelog service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://changelog.example.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Update API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateApiConfig {
    /// Base URL of the update-distribution API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpdateApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://update-api.example.com".to_string(),
            timeout_secs: 30,
        }
    }
}
