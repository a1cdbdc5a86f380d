//! Exit codes for the CLI

use slipway_core::error::SlipwayError;
use slipway_release::PrepareError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Invalid release tag
pub const VERSION_ERROR: i32 = 3;

/// Catalog load or save error
pub const CATALOG_ERROR: i32 = 4;

/// Artifact upload error
pub const UPLOAD_ERROR: i32 = 5;

/// Registration failed after the catalog was saved
pub const REGISTRATION_ERROR: i32 = 6;

/// Map an error chain to its exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(prepare) = err.downcast_ref::<PrepareError>() {
        return match prepare {
            PrepareError::Version(_) => VERSION_ERROR,
            PrepareError::Catalog(_) => CATALOG_ERROR,
            PrepareError::Storage(_) => UPLOAD_ERROR,
            PrepareError::Registration(_) => REGISTRATION_ERROR,
        };
    }
    if let Some(core) = err.downcast_ref::<SlipwayError>() {
        return match core {
            SlipwayError::Config(_) => CONFIG_ERROR,
            SlipwayError::Version(_) => VERSION_ERROR,
            SlipwayError::Catalog(_) => CATALOG_ERROR,
            _ => ERROR,
        };
    }
    ERROR
}
