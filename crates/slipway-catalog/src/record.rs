//! A single release record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One catalog entry per release tag.
///
/// Derived and operator-set fields are reset on every preparation run;
/// the download links and digests are only ever written by the upload
/// step, from the bytes that were actually uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Release tag, the unique key of this record
    pub tag: String,

    /// Display version derived from the tag
    #[serde(default)]
    pub version: String,

    /// Free-form label shown alongside the version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_text: Option<String>,

    /// Minimum version required to update to this release
    #[serde(default)]
    pub minimum_version: String,

    /// Release classification (major/minor/patch/rc)
    #[serde(rename = "type", default)]
    pub release_type: String,

    /// Whether the release has been published.
    ///
    /// A public record is immutable through the preparation pipeline.
    #[serde(default)]
    pub public: bool,

    /// Early-access flag
    #[serde(default)]
    pub ea: bool,

    /// Build revision, operator-set
    #[serde(default)]
    pub revision: String,

    /// Release date, operator-set
    #[serde(default)]
    pub release_date: String,

    /// Link to the source tree for this tag
    #[serde(default)]
    pub github_repo: String,

    /// Link to the upgrade notes for this branch
    #[serde(default)]
    pub upgrade_md: String,

    /// Public URL of the install archive
    #[serde(default)]
    pub download_link_install: String,

    /// Public URL of the update archive
    #[serde(default)]
    pub download_link_update: String,

    #[serde(default)]
    pub sha1_install: String,

    #[serde(default)]
    pub sha256_install: String,

    #[serde(default)]
    pub sha1_update: String,

    #[serde(default)]
    pub sha256_update: String,

    /// When true, changelog content is curated by hand and the automatic
    /// merge is suppressed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,

    /// Changelog text per locale
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, String>,
}

impl ReleaseRecord {
    /// Create a record with default field values for a tag.
    ///
    /// The display version is the tag without a leading `v`.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let version = tag.strip_prefix('v').unwrap_or(&tag).to_string();
        Self {
            tag,
            version,
            ..Self::default()
        }
    }

    /// Whether the release has been published
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Whether the automatic changelog merge may touch this record
    pub fn changelog_permitted(&self) -> bool {
        !self.public && self.manual != Some(true)
    }

    /// Merge changelog content into the locale map.
    ///
    /// Existing locales not present in `locales` are kept; the map is
    /// never replaced wholesale.
    pub fn merge_locales(&mut self, locales: BTreeMap<String, String>) {
        self.locales.extend(locales);
    }
}
