//! `docsite` command line tool
//!
//! # Usage
//!
//! ```bash
//! docsite serve --host 0.0.0.0 --port 8000
//! docsite --dont-hit-db version pip stable
//! docsite export pip --output exports/pip.csv
//! ```

use clap::{Parser, Subcommand};
use docsite_projects::cli::{self, GlobalArgs, server::ServerArgs};
use std::path::PathBuf;

/// Project helpers for a documentation hosting service
#[derive(Parser)]
#[command(name = "docsite", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Resolve versions through the remote API instead of the local store
    #[arg(long, global = true)]
    dont_hit_db: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
    /// Print a version record as JSON
    Version {
        /// Project slug
        project: String,
        /// Version slug
        version: String,
    },
    /// Export a project's versions as CSV
    Export {
        /// Project slug
        project: String,
        /// Output file; missing directories are created
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let settings = cli::load_settings(&GlobalArgs {
        config: args.config.as_deref(),
        verbose: args.verbose,
        dont_hit_db: args.dont_hit_db,
    })?;
    cli::init_logging(&settings);

    match args.command {
        Command::Serve { port, host } => {
            cli::server::run_server_mode(settings, ServerArgs { port, host }).await?;
        }
        Command::Version { project, version } => {
            let json = cli::lookup::run_version_lookup(&settings, &project, &version).await?;
            println!("{}", json);
        }
        Command::Export { project, output } => {
            let count = cli::export::run_export(&settings, &project, &output).await?;
            eprintln!("Exported {} versions to {}", count, output.display());
        }
    }

    Ok(())
}
