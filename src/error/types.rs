//! Error type definitions
//!
//! Defines the main error types used throughout the project helpers.

use thiserror::Error;

/// Main error type for the project helpers
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No version matched the project and slug
    #[error("Version not found: {project}/{slug}")]
    NotFound { project: String, slug: String },

    /// The store returned more than one version for a unique lookup
    #[error("Multiple versions returned for {project}/{slug}: {count}")]
    MultipleObjectsReturned {
        project: String,
        slug: String,
        count: usize,
    },

    /// Refused to write through an unsafe path
    #[error("Unsafe path: {path}")]
    UnsafePath { path: String },

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote API answered with something unusable
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Local store errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid response header values
    #[error("Header error: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not-found error for a project/version pair
    pub fn not_found(project: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::NotFound {
            project: project.into(),
            slug: slug.into(),
        }
    }

    /// Create a multiple-match error for a project/version pair
    pub fn multiple_objects(
        project: impl Into<String>,
        slug: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::MultipleObjectsReturned {
            project: project.into(),
            slug: slug.into(),
            count,
        }
    }

    /// Create an unsafe path error
    pub fn unsafe_path(path: impl Into<String>) -> Self {
        Self::UnsafePath { path: path.into() }
    }

    /// Create an upstream API error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
