//! Cross check the group addresses of a GPA export against an ETS export

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use knx_project::logging::{init_logging, LoggingMode};
use knx_project::{compare_group_addresses, KnxProjectLoader};

#[derive(Parser, Debug)]
#[command(name = "compare_gpa_and_knxproj")]
#[command(about = "Report GPA group addresses that differ from or are missing in the ETS export")]
struct Args {
    /// GIRA project assistant export
    gpa: PathBuf,

    /// ETS export of the same installation
    knxproj: PathBuf,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(LoggingMode::Development)?;

    let loader = KnxProjectLoader::new();
    let gpa = loader.load(&args.gpa)?;
    let ets = loader.load(&args.knxproj)?;
    info!(
        "Comparing {} GPA with {} ETS group addresses",
        gpa.group_addresses.len(),
        ets.group_addresses.len()
    );

    let comparison = compare_group_addresses(&gpa.group_addresses, &ets.group_addresses);
    comparison.log();

    Ok(if comparison.is_consistent() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
