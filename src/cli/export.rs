//! `docsite export` subcommand

use crate::{
    Settings,
    export::{CsvLines, version_rows},
    lookup::version_source,
    utils::safe_write,
};
use anyhow::Result;
use std::path::Path;

/// Write a project's version export to `output`; returns the number of versions
pub async fn run_export(settings: &Settings, project: &str, output: &Path) -> Result<usize> {
    let source = version_source(settings)?;
    let versions = source.list_versions(project).await?;
    let count = versions.len();

    let mut csv = Vec::new();
    for line in CsvLines::new(version_rows(versions)) {
        csv.extend_from_slice(&line?);
    }

    safe_write(output, csv)?;
    tracing::info!(
        "Exported {} versions of {} to {}",
        count,
        project,
        output.display()
    );
    Ok(count)
}
