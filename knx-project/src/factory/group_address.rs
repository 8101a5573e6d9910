//! Construction of [`GroupAddress`] values from ETS elements and GPA documents

use tracing::{debug, error};
use xmltree::Element;

use crate::config::WriteAddressPolicy;
use crate::error::{ProjectError, Result};
use crate::finder::{numeric_attribute, optional_attribute, required_attribute, NamespacedFinder};
use crate::model::GroupAddress;

use super::strip_project_prefix;

/// Creates group addresses from ETS `GroupAddress` elements
#[derive(Debug, Clone)]
pub struct GroupAddressFactory {
    prefix: String,
}

impl GroupAddressFactory {
    /// Factory for ids carrying `"<project_prefix>_"`
    pub fn new(project_prefix: &str) -> Self {
        Self {
            prefix: format!("{}_", project_prefix),
        }
    }

    /// Create a group address from an ETS `GroupAddress` element.
    ///
    /// # Errors
    ///
    /// Every datapoint of an ETS export is expected to carry a type; a missing
    /// `DatapointType` is `ProjectError::MissingDatapointType`. Missing or
    /// malformed `Id`, `Name` or `Address` attributes are errors as well.
    pub fn from_element(&self, element: &Element) -> Result<GroupAddress> {
        let dtype = match optional_attribute(element, "DatapointType") {
            Some(dtype) => dtype,
            None => {
                let name = optional_attribute(element, "Name").unwrap_or_default();
                error!("All datapoints need an assigned DatapointType, '{}' has none", name);
                return Err(ProjectError::MissingDatapointType {
                    name: name.to_string(),
                });
            }
        };

        let id = required_attribute(element, "Id")?;
        let group_address = GroupAddress {
            id: strip_project_prefix(id, &self.prefix).to_string(),
            name: required_attribute(element, "Name")?.to_string(),
            address: numeric_attribute(element, "Address")?,
            dtype: dtype.to_string(),
        };

        debug!("GA {}: {}, {}", group_address, group_address.name, group_address.dtype);
        Ok(group_address)
    }
}

/// Creates group addresses from GIRA `KnxDataPoint` documents
#[derive(Debug, Clone)]
pub struct DatapointFactory {
    finder: NamespacedFinder,
    write_address_policy: WriteAddressPolicy,
}

impl DatapointFactory {
    pub fn new(finder: NamespacedFinder, write_address_policy: WriteAddressPolicy) -> Self {
        Self {
            finder,
            write_address_policy,
        }
    }

    /// Convert one datapoint document into zero, one or two group addresses.
    ///
    /// A read address of zero means "not configured" and yields nothing. The
    /// write address is emitted according to the [`WriteAddressPolicy`].
    pub fn from_datapoint_document(&self, root: &Element) -> Result<Vec<GroupAddress>> {
        if !root.name.contains("KnxDataPoint") {
            return Err(ProjectError::Schema(format!(
                "expected a KnxDataPoint document, found '{}'",
                root.name
            )));
        }

        let id = self.finder.child_text(root, "EntityId")?;
        // Unnamed datapoints export an empty `EntityName`
        let name = self
            .finder
            .optional_child_text(root, "EntityName")?
            .unwrap_or_default();
        let read_address = self.address_text(root, "ReadGroupAddress")?;
        let write_address = self.address_text(root, "WriteGroupAddress")?;
        let dtype = normalize_gpa_dtype(&self.finder.child_text(root, "DataTypeKnx")?)?;

        let mut group_addresses = Vec::new();
        if read_address != 0 {
            group_addresses.push(GroupAddress::new(&id, &name, read_address, &dtype));
        }

        let emit_write = match self.write_address_policy {
            WriteAddressPolicy::Ignore => false,
            WriteAddressPolicy::EmitDistinct => write_address != 0 && write_address != read_address,
        };
        if emit_write {
            group_addresses.push(GroupAddress::new(&id, &name, write_address, &dtype));
        }

        for group_address in &group_addresses {
            debug!("GA {}: {}, {}", group_address, group_address.name, group_address.dtype);
        }
        Ok(group_addresses)
    }

    fn address_text(&self, root: &Element, local_name: &str) -> Result<u16> {
        let text = self.finder.child_text(root, local_name)?;
        text.parse::<u16>()
            .map_err(|_| ProjectError::invalid_attribute(local_name, &text))
    }
}

/// Convert a GPA dtype (`"<main>.<sub>"`) into `"DPST-<main>-<sub>"`.
///
/// Leading zeros of the sub type are dropped; an all-zero sub type is `0`.
pub fn normalize_gpa_dtype(raw: &str) -> Result<String> {
    let (main, sub) = raw
        .split_once('.')
        .ok_or_else(|| ProjectError::invalid_attribute("DataTypeKnx", raw))?;

    let sub = sub.trim_start_matches('0');
    let sub = if sub.is_empty() { "0" } else { sub };
    Ok(format!("DPST-{}-{}", main, sub))
}
