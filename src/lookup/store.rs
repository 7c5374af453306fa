//! SQLite version store
//!
//! Schema:
//! - `projects`: id, slug (unique), name
//! - `versions`: id, project_id, slug, verbose_name, identifier, type,
//!   active, built, privacy_level; unique on `(project_id, slug)`

use super::VersionSource;
use crate::{
    Error, Result,
    types::{Version, VersionType},
};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS versions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    slug TEXT NOT NULL,
    verbose_name TEXT NOT NULL,
    identifier TEXT NOT NULL DEFAULT '',
    type TEXT NOT NULL DEFAULT 'unknown',
    active INTEGER NOT NULL DEFAULT 0,
    built INTEGER NOT NULL DEFAULT 0,
    privacy_level TEXT NOT NULL DEFAULT 'public',
    UNIQUE (project_id, slug)
);
";

const VERSION_COLUMNS: &str = "v.id, p.slug, v.slug, v.verbose_name, v.identifier, v.type, \
     v.active, v.built, v.privacy_level";

/// Fields for inserting a version
#[derive(Debug, Clone)]
pub struct NewVersion<'a> {
    pub slug: &'a str,
    pub verbose_name: &'a str,
    pub identifier: &'a str,
    pub version_type: VersionType,
    pub active: bool,
    pub built: bool,
    pub privacy_level: &'a str,
}

impl<'a> NewVersion<'a> {
    /// An active public branch named after its slug
    pub fn branch(slug: &'a str, identifier: &'a str) -> Self {
        Self {
            slug,
            verbose_name: slug,
            identifier,
            version_type: VersionType::Branch,
            active: true,
            built: false,
            privacy_level: "public",
        }
    }
}

/// Version source backed by a local SQLite database
#[derive(Debug)]
pub struct StoreVersionSource {
    conn: Arc<Mutex<Connection>>,
}

fn row_to_version(row: &Row) -> rusqlite::Result<Version> {
    let version_type: String = row.get(5)?;
    Ok(Version {
        id: row.get(0)?,
        project: row.get(1)?,
        slug: row.get(2)?,
        verbose_name: row.get(3)?,
        identifier: row.get(4)?,
        version_type: version_type.parse().unwrap_or_default(),
        active: row.get(6)?,
        built: row.get(7)?,
        privacy_level: row.get(8)?,
    })
}

impl StoreVersionSource {
    /// Open (or create) the database at `path` and apply the schema
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!("Opening version store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::migrate(&conn)?;
        Ok(Self::from_connection(conn))
    }

    /// In-memory store with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection as is
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create the tables if they are missing
    pub fn migrate(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        lock_conn(&self.conn)
    }

    /// Run `f` against the connection on the blocking thread pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = lock_conn(&conn)?;
            f(&guard)
        })
        .await
            .map_err(|e| Error::internal(format!("version store task failed: {}", e)))?
    }

    /// Insert a project, returning its id; an existing slug is reused
    pub fn insert_project(&self, slug: &str, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO projects (slug, name) VALUES (?1, ?2)",
            params![slug, name],
        )?;
        let id = conn.query_row(
            "SELECT id FROM projects WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Insert a version for an existing project
    pub fn insert_version(&self, project: &str, version: &NewVersion<'_>) -> Result<Version> {
        let conn = self.lock()?;
        let project_id: i64 = conn
            .query_row(
                "SELECT id FROM projects WHERE slug = ?1",
                params![project],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::not_found(project, version.slug))?;

        conn.execute(
            "INSERT INTO versions \
             (project_id, slug, verbose_name, identifier, type, active, built, privacy_level) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                project_id,
                version.slug,
                version.verbose_name,
                version.identifier,
                version.version_type.as_str(),
                version.active,
                version.built,
                version.privacy_level,
            ],
        )?;

        Ok(Version {
            id: conn.last_insert_rowid(),
            project: project.to_string(),
            slug: version.slug.to_string(),
            verbose_name: version.verbose_name.to_string(),
            identifier: version.identifier.to_string(),
            version_type: version.version_type,
            active: version.active,
            built: version.built,
            privacy_level: version.privacy_level.to_string(),
        })
    }
}

fn lock_conn(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| Error::internal("version store lock poisoned"))
}

fn get_unique(conn: &Connection, project: &str, version: &str) -> Result<Version> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VERSION_COLUMNS} FROM versions v \
         JOIN projects p ON p.id = v.project_id \
         WHERE p.slug = ?1 AND v.slug = ?2 \
         LIMIT 2"
    ))?;
    let mut matches = stmt
        .query_map(params![project, version], row_to_version)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    match matches.len() {
        0 => Err(Error::not_found(project, version)),
        1 => Ok(matches.remove(0)),
        _ => {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM versions v \
                 JOIN projects p ON p.id = v.project_id \
                 WHERE p.slug = ?1 AND v.slug = ?2",
                params![project, version],
                |row| row.get(0),
            )?;
            Err(Error::multiple_objects(project, version, count as usize))
        }
    }
}

fn get_all(conn: &Connection, project: &str) -> Result<Vec<Version>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VERSION_COLUMNS} FROM versions v \
         JOIN projects p ON p.id = v.project_id \
         WHERE p.slug = ?1 \
         ORDER BY v.id"
    ))?;
    let versions = stmt
        .query_map(params![project], row_to_version)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(versions)
}

#[async_trait]
impl VersionSource for StoreVersionSource {
    async fn version_from_slug(&self, project: &str, version: &str) -> Result<Version> {
        let (owned_project, owned_version) = (project.to_string(), version.to_string());
        let found = self
            .with_conn(move |conn| get_unique(conn, &owned_project, &owned_version))
            .await?;
        tracing::debug!("Resolved {}/{} from store (id={})", project, version, found.id);
        Ok(found)
    }

    async fn list_versions(&self, project: &str) -> Result<Vec<Version>> {
        let owned_project = project.to_string();
        let versions = self
            .with_conn(move |conn| get_all(conn, &owned_project))
            .await?;
        tracing::debug!("Listed {} versions of {} from store", versions.len(), project);
        Ok(versions)
    }

    fn name(&self) -> &'static str {
        "store"
    }
}
