//! Version record definitions
//!
//! [`Version`] is what every lookup returns. [`ApiVersion`] is the lighter
//! shape served by the remote API and converts into it unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a documentation version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Branch,
    Tag,
    External,
    #[default]
    #[serde(other)]
    Unknown,
}

impl VersionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
            Self::External => "external",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "branch" => Self::Branch,
            "tag" => Self::Tag,
            "external" => Self::External,
            _ => Self::Unknown,
        })
    }
}

/// A documentation version of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Backing record id
    pub id: i64,
    /// Slug of the owning project
    pub project: String,
    /// Version slug, unique within the project
    pub slug: String,
    /// Human readable name
    pub verbose_name: String,
    /// VCS identifier (branch name, tag or commit)
    pub identifier: String,
    /// Version kind
    #[serde(rename = "type")]
    pub version_type: VersionType,
    /// Whether the version is enabled
    pub active: bool,
    /// Whether the version has been built at least once
    pub built: bool,
    /// Privacy level (`public` or `private`)
    pub privacy_level: String,
}

impl Version {
    /// Column names used for CSV exports
    pub const CSV_HEADER: [&'static str; 7] = [
        "slug",
        "verbose_name",
        "identifier",
        "type",
        "active",
        "built",
        "privacy_level",
    ];

    /// Fields in [`Version::CSV_HEADER`] order
    pub fn csv_record(&self) -> Vec<String> {
        vec![
            self.slug.clone(),
            self.verbose_name.clone(),
            self.identifier.clone(),
            self.version_type.to_string(),
            self.active.to_string(),
            self.built.to_string(),
            self.privacy_level.clone(),
        ]
    }
}

/// Project reference nested in API version payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProject {
    pub id: i64,
    pub slug: String,
}

/// Version as returned by the remote API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVersion {
    pub id: i64,
    pub project: ApiProject,
    pub slug: String,
    pub verbose_name: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(rename = "type", default)]
    pub version_type: VersionType,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub built: bool,
    #[serde(default = "default_privacy_level")]
    pub privacy_level: String,
}

fn default_privacy_level() -> String {
    "public".to_string()
}

impl From<ApiVersion> for Version {
    fn from(api: ApiVersion) -> Self {
        Self {
            id: api.id,
            project: api.project.slug,
            slug: api.slug,
            verbose_name: api.verbose_name,
            identifier: api.identifier,
            version_type: api.version_type,
            active: api.active,
            built: api.built,
            privacy_level: api.privacy_level,
        }
    }
}

/// One page of a paginated API listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}
