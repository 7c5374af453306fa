//! Command line entry points
//!
//! Shared settings and logging setup plus one module per subcommand.

pub mod export;
pub mod lookup;
pub mod server;

use crate::config::{ConfigLoader, Settings};
use anyhow::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Flags shared by every subcommand
#[derive(Debug, Default, Clone)]
pub struct GlobalArgs<'a> {
    pub config: Option<&'a Path>,
    pub verbose: bool,
    pub dont_hit_db: bool,
}

/// Resolve settings: file, then environment, then command line flags
pub fn load_settings(args: &GlobalArgs<'_>) -> Result<Settings> {
    load_settings_with(args, |key| std::env::var(key).ok())
}

/// Same as [`load_settings`] with an explicit variable source
pub fn load_settings_with<F>(args: &GlobalArgs<'_>, var: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = ConfigLoader::new().load_with(args.config, var)?;
    if args.verbose {
        settings.logging.verbose = true;
    }
    if args.dont_hit_db {
        settings.lookup.dont_hit_db = true;
    }
    Ok(settings)
}

/// Install the global tracing subscriber; logs go to stderr
pub fn init_logging(settings: &Settings) {
    let filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(settings.log_directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
