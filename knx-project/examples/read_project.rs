//! Load a project archive and log everything found in it

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use knx_project::logging::{init_logging_from_env, LoggingMode};
use knx_project::{KnxProjectLoader, LoaderConfig, WriteAddressPolicy};

#[derive(Parser, Debug)]
#[command(name = "read_project")]
#[command(about = "Log meta data, group addresses and devices of a KNX project archive")]
struct Args {
    /// Project archive (.knxproj or .gpa)
    archive: PathBuf,

    /// Also emit distinct GPA write addresses
    #[arg(long)]
    write_addresses: bool,

    /// Keep the extracted documents in this directory
    #[arg(long)]
    scratch_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging_from_env(LoggingMode::Development)?;

    let mut config = LoaderConfig::new();
    if args.write_addresses {
        config = config.with_write_address_policy(WriteAddressPolicy::EmitDistinct);
    }
    if let Some(dir) = args.scratch_dir {
        config = config.with_scratch_dir(dir);
    }

    let project = KnxProjectLoader::with_config(config).load(&args.archive)?;
    info!("{:?} project", project.kind);

    info!("{} group addresses:", project.group_addresses.len());
    for ga in &project.group_addresses {
        info!("\t{:>9} {:<40} {}", ga.to_string(), ga.name, ga.dtype);
    }

    let index = project.group_address_index();
    info!("{} devices:", project.devices.len());
    for device in &project.devices {
        info!("\t{} {} ({})", device.individual_address(), device.name, device.product_id);
        for id in &device.group_address_ids {
            match index.get(id) {
                Some(ga) => info!("\t\t{} {}", ga, ga.name),
                None => warn!("\t\tunknown group address {}", id),
            }
        }
    }
    Ok(())
}
