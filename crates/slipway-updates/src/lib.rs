//! Slipway Updates - Update-distribution API client
//!
//! Projects catalog state into the parameter shape of the external
//! update API and performs the registration calls.

mod client;
mod error;
mod types;

pub use client::{HttpUpdateApi, UpdateApi};
pub use error::{Result, UpdateApiError};
pub use types::{InsertReleaseParams, ReleaseParams};
