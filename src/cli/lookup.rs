//! `docsite version` subcommand

use crate::{Settings, lookup::version_source};
use anyhow::{Context, Result};

/// Resolve one version and render it as pretty JSON
pub async fn run_version_lookup(
    settings: &Settings,
    project: &str,
    version: &str,
) -> Result<String> {
    let source = version_source(settings)?;
    let found = source
        .version_from_slug(project, version)
        .await
        .with_context(|| format!("Lookup of {}/{} failed", project, version))?;
    Ok(serde_json::to_string_pretty(&found)?)
}
