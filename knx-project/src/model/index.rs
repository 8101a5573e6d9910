//! Lookup of group addresses by id
//!
//! Devices reference group addresses by id only. The index is built once per
//! project and resolves those references without storing pointers on devices.

use std::collections::HashMap;

use super::{Device, GroupAddress};
use crate::error::{ProjectError, Result};

/// Group addresses keyed by their id
#[derive(Debug, Clone, Default)]
pub struct GroupAddressIndex {
    by_id: HashMap<String, GroupAddress>,
}

impl GroupAddressIndex {
    /// Build the index. Later entries win if an id occurs twice.
    pub fn new<'a>(group_addresses: impl IntoIterator<Item = &'a GroupAddress>) -> Self {
        Self {
            by_id: group_addresses
                .into_iter()
                .map(|ga| (ga.id.clone(), ga.clone()))
                .collect(),
        }
    }

    /// Look up a group address by id.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::UnresolvedGroupAddress` if the id is unknown.
    pub fn resolve(&self, id: &str) -> Result<&GroupAddress> {
        self.by_id
            .get(id)
            .ok_or_else(|| ProjectError::UnresolvedGroupAddress(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&GroupAddress> {
        self.by_id.get(id)
    }

    /// Resolve all group addresses a device links to, in link order
    pub fn resolve_device(&self, device: &Device) -> Result<Vec<&GroupAddress>> {
        device
            .group_address_ids
            .iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
