//! # Version Lookup
//!
//! Resolves a `(project, version)` slug pair into a [`Version`].
//!
//! Two backends implement [`VersionSource`]:
//! - [`ApiVersionSource`] asks the remote API (used when `lookup.dont_hit_db` is set)
//! - [`StoreVersionSource`] queries the local SQLite store
//!
//! The backend is picked once by [`version_source`] when the process is
//! configured and shared afterwards as `Arc<dyn VersionSource>`.
//!
//! ```rust,no_run
//! use docsite_projects::{Settings, lookup::version_source};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::from_env()?;
//! let source = version_source(&settings)?;
//! let version = source.version_from_slug("pip", "stable").await?;
//! println!("{} -> {}", version.slug, version.identifier);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod store;

pub use api::ApiVersionSource;
pub use store::{NewVersion, StoreVersionSource};

use crate::{Result, config::Settings, types::Version};
use async_trait::async_trait;
use std::sync::Arc;

/// A backend able to resolve versions by slug
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Return the single version `version` of project `project`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when nothing
    /// matches. Stores that can hold duplicates fail with
    /// [`Error::MultipleObjectsReturned`](crate::Error::MultipleObjectsReturned).
    async fn version_from_slug(&self, project: &str, version: &str) -> Result<Version>;

    /// All versions of a project ordered by id; empty for unknown projects.
    async fn list_versions(&self, project: &str) -> Result<Vec<Version>>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Build the version source selected by the settings
pub fn version_source(settings: &Settings) -> Result<Arc<dyn VersionSource>> {
    let source: Arc<dyn VersionSource> = if settings.lookup.dont_hit_db {
        Arc::new(ApiVersionSource::new(&settings.api)?)
    } else {
        Arc::new(StoreVersionSource::open(&settings.store.path)?)
    };

    tracing::info!("Using {} version source", source.name());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_version_source_local() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.store.path = dir.path().join("nested").join("docsite.db");

        let source = version_source(&settings).unwrap();
        assert_eq!(source.name(), "store");
        assert!(settings.store.path.exists());
    }

    #[test]
    fn test_version_source_remote() {
        let mut settings = Settings::default();
        settings.lookup.dont_hit_db = true;
        settings.api.base_url = "https://docs.example.com".to_string();

        let source = version_source(&settings).unwrap();
        assert_eq!(source.name(), "api");
    }

    #[test]
    fn test_version_source_remote_invalid_url() {
        let mut settings = Settings::default();
        settings.lookup.dont_hit_db = true;
        settings.api.base_url = "::not-a-url".to_string();

        assert!(version_source(&settings).is_err());
    }
}
