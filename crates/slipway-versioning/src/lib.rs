//! Slipway Versioning - Version tag classification
//!
//! Pure functions deriving branches, update channels and release types from
//! a version tag. The values produced here end up in persisted catalog
//! records and external API calls, so classification must be deterministic.

use regex::Regex;
use serde::{Deserialize, Serialize};

use slipway_core::error::VersionError;

/// Parsed components of a release tag.
///
/// Tags follow `MAJOR.MINOR.PATCH`, optionally with a fourth numeric
/// segment (`6.3.1.2`) and an optional pre-release suffix (`6.4.0-rc1`).
/// A leading `v` is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComponents {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: Option<u64>,
    pub suffix: Option<String>,
}

impl TagComponents {
    /// Parse a release tag into its components
    pub fn parse(tag: &str) -> Result<Self, VersionError> {
        let pattern = Regex::new(
            r"^v?(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:\.(?P<build>\d+))?(?:-(?P<suffix>[0-9A-Za-z.]+))?$",
        )
        .expect("Invalid regex");

        let captures = pattern
            .captures(tag)
            .ok_or_else(|| VersionError::InvalidTag(tag.to_string()))?;

        let number = |name: &str| -> Result<u64, VersionError> {
            captures[name]
                .parse()
                .map_err(|_| VersionError::InvalidTag(tag.to_string()))
        };

        Ok(Self {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            build: match captures.name("build") {
                Some(b) => Some(
                    b.as_str()
                        .parse()
                        .map_err(|_| VersionError::InvalidTag(tag.to_string()))?,
                ),
                None => None,
            },
            suffix: captures.name("suffix").map(|s| s.as_str().to_string()),
        })
    }

    /// Whether the suffix marks a release candidate
    pub fn is_release_candidate(&self) -> bool {
        self.suffix
            .as_deref()
            .is_some_and(|s| s.to_ascii_lowercase().starts_with("rc"))
    }
}

/// Distribution channel derived from a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateChannel {
    /// Final releases without a suffix
    Stable,
    /// Release candidates
    Rc,
    /// Any other suffixed pre-release
    Dev,
}

impl std::fmt::Display for UpdateChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateChannel::Stable => write!(f, "stable"),
            UpdateChannel::Rc => write!(f, "rc"),
            UpdateChannel::Dev => write!(f, "dev"),
        }
    }
}

/// Release classification derived from a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Rc,
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseType::Major => write!(f, "major"),
            ReleaseType::Minor => write!(f, "minor"),
            ReleaseType::Patch => write!(f, "patch"),
            ReleaseType::Rc => write!(f, "rc"),
        }
    }
}

/// Display version for a tag: the tag itself without a leading `v`
pub fn display_version(tag: &str) -> Result<String, VersionError> {
    TagComponents::parse(tag)?;
    Ok(tag.strip_prefix('v').unwrap_or(tag).to_string())
}

/// Minor branch of a tag.
///
/// Three-part tags collapse to `major.minor`; four-part tags keep the third
/// segment (`6.3.1.2` lives on branch `6.3.1`).
pub fn minor_branch(tag: &str) -> Result<String, VersionError> {
    let c = TagComponents::parse(tag)?;
    Ok(match c.build {
        Some(_) => format!("{}.{}.{}", c.major, c.minor, c.patch),
        None => format!("{}.{}", c.major, c.minor),
    })
}

/// Major branch of a tag, always `major.minor`.
///
/// Upgrade notes are maintained per major branch (`UPGRADE-6.4.md`).
pub fn major_branch(tag: &str) -> Result<String, VersionError> {
    let c = TagComponents::parse(tag)?;
    Ok(format!("{}.{}", c.major, c.minor))
}

/// Distribution channel for a tag
pub fn update_channel(tag: &str) -> Result<UpdateChannel, VersionError> {
    let c = TagComponents::parse(tag)?;
    Ok(match c.suffix {
        None => UpdateChannel::Stable,
        Some(_) if c.is_release_candidate() => UpdateChannel::Rc,
        Some(_) => UpdateChannel::Dev,
    })
}

/// Release type for a tag
pub fn release_type(tag: &str) -> Result<ReleaseType, VersionError> {
    let c = TagComponents::parse(tag)?;
    if c.is_release_candidate() {
        return Ok(ReleaseType::Rc);
    }
    // Four-part tags open a new branch at build 0 (6.3.1.0 is the 6.3.1
    // minor release); three-part tags open one at patch 0.
    let opens_branch = match c.build {
        Some(build) => build == 0,
        None => c.patch == 0,
    };
    Ok(if c.minor == 0 && c.patch == 0 && c.build.unwrap_or(0) == 0 {
        ReleaseType::Major
    } else if opens_branch {
        ReleaseType::Minor
    } else {
        ReleaseType::Patch
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_part_tag() {
        let c = TagComponents::parse("6.4.5").unwrap();
        assert_eq!(c.major, 6);
        assert_eq!(c.minor, 4);
        assert_eq!(c.patch, 5);
        assert!(c.build.is_none());
        assert!(c.suffix.is_none());
    }

    #[test]
    fn test_parse_four_part_tag() {
        let c = TagComponents::parse("6.3.1.2").unwrap();
        assert_eq!(c.patch, 1);
        assert_eq!(c.build, Some(2));
    }

    #[test]
    fn test_parse_with_v_prefix_and_suffix() {
        let c = TagComponents::parse("v6.4.0-rc1").unwrap();
        assert_eq!(c.suffix.as_deref(), Some("rc1"));
        assert!(c.is_release_candidate());
    }

    #[test]
    fn test_parse_invalid_tag() {
        assert!(TagComponents::parse("six.four.five").is_err());
        assert!(TagComponents::parse("6.4").is_err());
        assert!(TagComponents::parse("").is_err());
    }

    #[test]
    fn test_display_version_strips_v() {
        assert_eq!(display_version("v6.4.5").unwrap(), "6.4.5");
        assert_eq!(display_version("6.4.5").unwrap(), "6.4.5");
    }

    #[test]
    fn test_minor_branch() {
        assert_eq!(minor_branch("6.4.5").unwrap(), "6.4");
        assert_eq!(minor_branch("6.2.3").unwrap(), "6.2");
        assert_eq!(minor_branch("6.3.1.2").unwrap(), "6.3.1");
    }

    #[test]
    fn test_major_branch() {
        assert_eq!(major_branch("6.4.5").unwrap(), "6.4");
        assert_eq!(major_branch("6.3.1.2").unwrap(), "6.3");
    }

    #[test]
    fn test_update_channel() {
        assert_eq!(update_channel("6.4.5").unwrap(), UpdateChannel::Stable);
        assert_eq!(update_channel("6.4.0-rc2").unwrap(), UpdateChannel::Rc);
        assert_eq!(update_channel("6.4.0-beta1").unwrap(), UpdateChannel::Dev);
    }

    #[test]
    fn test_release_type() {
        assert_eq!(release_type("7.0.0").unwrap(), ReleaseType::Major);
        assert_eq!(release_type("6.4.0").unwrap(), ReleaseType::Minor);
        assert_eq!(release_type("6.4.5").unwrap(), ReleaseType::Patch);
        assert_eq!(release_type("6.3.1.0").unwrap(), ReleaseType::Minor);
        assert_eq!(release_type("6.3.1.2").unwrap(), ReleaseType::Patch);
        assert_eq!(release_type("6.4.0-rc1").unwrap(), ReleaseType::Rc);
    }

    #[test]
    fn test_classifiers_are_deterministic() {
        for _ in 0..3 {
            assert_eq!(minor_branch("6.4.5").unwrap(), "6.4");
            assert_eq!(release_type("6.4.5").unwrap(), ReleaseType::Patch);
        }
    }
}
