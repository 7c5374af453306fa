//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the application.

pub mod fs;
pub mod version;

pub use fs::safe_write;
pub use version::get_version;
