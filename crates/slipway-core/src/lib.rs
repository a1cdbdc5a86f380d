//! Slipway Core - Core library for the release publisher
//!
//! This crate provides the shared error taxonomy and the configuration
//! layer used by the Slipway release preparation pipeline.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{CatalogError, ConfigError, Result, SlipwayError, VersionError};
