//! The release catalog collection

use serde::{Deserialize, Serialize};
use tracing::debug;

use slipway_core::error::CatalogError;

use crate::record::ReleaseRecord;

/// Ordered collection of release records, unique by tag.
///
/// Serializes to and from the persisted catalog document. Loaded fresh at
/// the start of a preparation run and written back once at the end; never
/// cached across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseCatalog {
    #[serde(default)]
    pub releases: Vec<ReleaseRecord>,
}

impl ReleaseCatalog {
    /// Deserialize a catalog from the persisted document
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        debug!(releases = catalog.releases.len(), "catalog parsed");
        Ok(catalog)
    }

    /// Serialize the full catalog with stable, human-diffable formatting
    pub fn to_pretty_json(&self) -> Result<String, CatalogError> {
        let mut document = serde_json::to_string_pretty(self)?;
        document.push('\n');
        Ok(document)
    }

    /// Find a record by tag
    pub fn find_by_tag(&self, tag: &str) -> Option<&ReleaseRecord> {
        self.releases.iter().find(|r| r.tag == tag)
    }

    /// Find a record by tag, mutably
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut ReleaseRecord> {
        self.releases.iter_mut().find(|r| r.tag == tag)
    }

    /// Create and insert a record with default field values for a tag
    pub fn add_record(&mut self, tag: &str) -> Result<&mut ReleaseRecord, CatalogError> {
        if self.find_by_tag(tag).is_some() {
            return Err(CatalogError::DuplicateTag(tag.to_string()));
        }
        self.releases.push(ReleaseRecord::new(tag));
        debug!(%tag, "release record created");
        Ok(self
            .releases
            .last_mut()
            .expect("record was just inserted"))
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_add_and_find() {
        let mut catalog = ReleaseCatalog::default();
        catalog.add_record("6.4.5").unwrap();

        assert!(catalog.find_by_tag("6.4.5").is_some());
        assert!(catalog.find_by_tag("6.4.6").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_add_duplicate_tag() {
        let mut catalog = ReleaseCatalog::default();
        catalog.add_record("6.4.5").unwrap();

        let err = catalog.add_record("6.4.5").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTag(tag) if tag == "6.4.5"));
    }

    #[test]
    fn test_from_json_corrupt_document() {
        let err = ReleaseCatalog::from_json(b"<releases/>").unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt(_)));
    }

    #[test]
    fn test_from_json_empty_document() {
        let catalog = ReleaseCatalog::from_json(b"{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let mut catalog = ReleaseCatalog::default();
        {
            let record = catalog.add_record("6.4.5").unwrap();
            record.minimum_version = "6.2.0".to_string();
            record.release_type = "patch".to_string();
            record.public = true;
            record.ea = true;
            record.revision = "deadbeef".to_string();
            record.release_date = "2021-08-11".to_string();
            record.github_repo = "https://github.com/example/platform/tree/6.4.5".to_string();
            record.download_link_install = "https://releases.example.com/a.zip".to_string();
            record.sha1_install = "abc123".to_string();
            record.sha256_install = "def456".to_string();
            record.version_text = Some("Summer release".to_string());
            record.manual = Some(true);
            record.locales = BTreeMap::from([
                ("de-DE".to_string(), "Text".to_string()),
                ("en-GB".to_string(), "Text".to_string()),
            ]);
        }
        catalog.add_record("6.4.6").unwrap();

        let document = catalog.to_pretty_json().unwrap();
        let reloaded = ReleaseCatalog::from_json(document.as_bytes()).unwrap();

        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_pretty_json_is_stable() {
        let mut catalog = ReleaseCatalog::default();
        catalog.add_record("6.4.5").unwrap();

        let first = catalog.to_pretty_json().unwrap();
        let second = catalog.to_pretty_json().unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
    }

    #[test]
    fn test_wire_field_names() {
        let mut catalog = ReleaseCatalog::default();
        catalog.add_record("6.4.5").unwrap().release_type = "patch".to_string();

        let document = catalog.to_pretty_json().unwrap();
        assert!(document.contains("\"type\": \"patch\""));
        assert!(!document.contains("release_type"));
    }
}
