//! JSON export of group addresses
//!
//! The export maps the three level notation of every group address onto its
//! datapoint type and name:
//!
//! ```json
//! { "1/2/3": { "dtype": "DPST-1-1", "name": "Light kitchen" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::GroupAddress;

/// Value of one entry in the export map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatapointEntry {
    pub dtype: String,
    pub name: String,
}

/// Map of `"<main>/<middle>/<sub>"` to type and name, sorted by key.
///
/// If several group addresses share an address, the last one wins.
pub fn group_address_map(group_addresses: &[GroupAddress]) -> BTreeMap<String, DatapointEntry> {
    group_addresses
        .iter()
        .map(|ga| {
            (
                ga.to_string(),
                DatapointEntry {
                    dtype: ga.dtype.clone(),
                    name: ga.name.clone(),
                },
            )
        })
        .collect()
}

/// Pretty printed JSON of [`group_address_map`]
pub fn to_json(group_addresses: &[GroupAddress]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&group_address_map(group_addresses))?)
}

/// Write the JSON export to `path`
pub fn write_json(group_addresses: &[GroupAddress], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(group_addresses)?)?;
    info!("Wrote {} group addresses to {}", group_addresses.len(), path.display());
    Ok(())
}
