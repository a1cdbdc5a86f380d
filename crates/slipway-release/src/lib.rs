//! Slipway Release - Release preparation orchestration
//!
//! Drives the end-to-end preparation of one release tag: catalog entry
//! lifecycle, artifact hashing and upload, changelog merge, catalog save
//! and registration with the external update API.

mod error;
mod service;

pub use error::{PrepareError, Result};
pub use service::{PrepareOutcome, RejectReason, ReleasePrepareService};
