//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

/// Test helper functions
#[allow(dead_code)]
pub mod helpers {
    use docsite_projects::{
        VersionType,
        lookup::{NewVersion, StoreVersionSource},
    };
    use std::path::Path;

    /// Seed a store with `pip` (latest, stable) and `requests` (latest)
    pub fn seed(store: &StoreVersionSource) {
        store.insert_project("pip", "pip").unwrap();
        store.insert_project("requests", "Requests").unwrap();
        store
            .insert_version("pip", &NewVersion::branch("latest", "main"))
            .unwrap();
        store
            .insert_version(
                "pip",
                &NewVersion {
                    slug: "stable",
                    verbose_name: "23.1",
                    identifier: "23.1",
                    version_type: VersionType::Tag,
                    active: true,
                    built: true,
                    privacy_level: "public",
                },
            )
            .unwrap();
        store
            .insert_version("requests", &NewVersion::branch("latest", "master"))
            .unwrap();
    }

    /// Create a seeded database file at `path`
    pub fn create_seeded_db(path: &Path) {
        let store = StoreVersionSource::open(path).unwrap();
        seed(&store);
    }

    /// Seeded in-memory store
    pub fn seeded_memory_store() -> StoreVersionSource {
        let store = StoreVersionSource::open_in_memory().unwrap();
        seed(&store);
        store
    }
}
