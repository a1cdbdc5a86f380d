//! Slipway Changelog - Changelog source client
//!
//! Retrieves per-locale changelog text for a release tag. Availability is
//! not guaranteed before a release branch stabilizes, so callers treat
//! fetch failures as recoverable.

mod client;
mod error;

pub use client::{ChangelogSource, HttpChangelogSource};
pub use error::{ChangelogError, Result};
