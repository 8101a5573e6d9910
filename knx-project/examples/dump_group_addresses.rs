//! Load a project archive and write its group addresses as JSON
//!
//! ```text
//! cargo run --example dump_group_addresses -- home.knxproj -o knx_mapping.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use knx_project::logging::{init_logging, LoggingMode};
use knx_project::{export, KnxProjectLoader};

/// Dump the group addresses of an ETS or GPA project
#[derive(Parser, Debug)]
#[command(name = "dump_group_addresses")]
#[command(about = "Write the group addresses of a KNX project archive as JSON")]
struct Args {
    /// Project archive (.knxproj or .gpa)
    archive: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "knx_mapping.json")]
    output: PathBuf,

    /// Verbose diagnostics
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode = if args.debug {
        LoggingMode::Debug
    } else {
        LoggingMode::Development
    };
    init_logging(mode)?;

    let project = KnxProjectLoader::new()
        .load(&args.archive)
        .with_context(|| format!("Failed to load {}", args.archive.display()))?;

    export::write_json(&project.group_addresses, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Done");
    Ok(())
}
