//! Type definitions
//!
//! This module contains the version records and HTTP response bodies.

pub mod response;
pub mod version;

pub use response::{ErrorResponse, PingResponse};
pub use version::{ApiPage, ApiProject, ApiVersion, Version, VersionType};
