//! Docsite project helpers
//!
//! Small building blocks used by a documentation hosting service:
//!
//! - **Version lookup**: resolve a `(project, version)` slug pair through the
//!   remote API or the local store, picked once at startup
//! - **Safe file writes**: write UTF-8 text, creating parent directories and
//!   dropping bytes that are not valid UTF-8
//! - **CSV downloads**: stream rows to an HTTP client as a `text/csv`
//!   attachment, one line at a time
//!
//! # Usage
//!
//! ```bash
//! docsite serve --port 8000
//! docsite version pip stable
//! docsite export pip --output exports/pip.csv
//! ```
//!
//! # Examples
//!
//! ```rust
//! use docsite_projects::utils::safe_write;
//!
//! # fn example() -> docsite_projects::Result<()> {
//! let dir = std::env::temp_dir().join("docsite-example");
//! safe_write(dir.join("nested").join("conf.py"), "project = 'pip'\n")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod lookup;
pub mod server;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use lookup::VersionSource;
pub use types::{ErrorResponse, PingResponse, Version, VersionType};
