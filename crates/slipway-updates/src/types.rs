//! Update API parameter types

use serde::Serialize;

/// Base parameters shared by every registration call
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseParams {
    /// Resolved display version of the release
    pub release_version: String,

    /// Distribution channel the release targets
    pub channel: String,

    /// Optional free-form version label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_text: Option<String>,
}

/// Parameters for inserting release data
#[derive(Debug, Clone, Serialize)]
pub struct InsertReleaseParams {
    #[serde(flatten)]
    pub release: ReleaseParams,

    /// Minimum version required to update to this release
    pub min_version: String,

    pub install_uri: String,
    pub install_size: u64,
    pub install_sha1: String,
    pub install_sha256: String,

    pub update_uri: String,
    pub update_size: u64,
    pub update_sha1: String,
    pub update_sha256: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_text_is_omitted_when_absent() {
        let params = ReleaseParams {
            release_version: "6.4.5".to_string(),
            channel: "stable".to_string(),
            version_text: None,
        };

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("version_text").is_none());
        assert_eq!(json["release_version"], "6.4.5");
    }

    #[test]
    fn test_insert_params_flatten_base() {
        let params = InsertReleaseParams {
            release: ReleaseParams {
                release_version: "6.4.5".to_string(),
                channel: "stable".to_string(),
                version_text: Some("Summer release".to_string()),
            },
            min_version: "6.2.0".to_string(),
            install_uri: "https://releases.example.com/sw6/install.zip".to_string(),
            install_size: 1024,
            install_sha1: "abc".to_string(),
            install_sha256: "def".to_string(),
            update_uri: "https://releases.example.com/sw6/update.zip".to_string(),
            update_size: 512,
            update_sha1: "ghi".to_string(),
            update_sha256: "jkl".to_string(),
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["channel"], "stable");
        assert_eq!(json["version_text"], "Summer release");
        assert_eq!(json["install_size"], 1024);
    }
}
