//! Render all recognized switches of an ETS project

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use knx_devices::resolve_vendor;
use knx_project::logging::{init_logging, LoggingMode};
use knx_project::KnxProjectLoader;

#[derive(Parser, Debug)]
#[command(name = "read_switches")]
#[command(about = "Generate documentation for the switches of an ETS project export")]
struct Args {
    /// ETS .knxproj export
    archive: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingMode::Development)?;

    let project = KnxProjectLoader::new().load(&args.archive)?;
    let index = project.group_address_index();

    info!("Switches:");
    for device in project.devices.iter().cloned() {
        let device = resolve_vendor(device, &index)?;
        if let Some(switch) = device.as_switch() {
            println!("\n{}\n", switch.render()?);
        }
    }
    Ok(())
}
