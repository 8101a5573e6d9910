//! Physical topology of a KNX installation: areas, lines and devices

use serde::Serialize;
use std::sync::Arc;

use super::KnxAddressable;

/// Address assigned to devices whose `Address` attribute is absent
pub const DEFAULT_DEVICE_ADDRESS: u16 = 99;

/// KNX area (top level of the bus topology)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub address: u16,
}

/// KNX line, a segment within an [`Area`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub address: u16,
    /// Area this line belongs to, shared by all lines of the area
    pub area: Arc<Area>,
    /// Transport medium reference, e.g. `MT-0` for twisted pair
    pub medium: String,
}

/// A physical device on a [`Line`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub address: u16,
    /// Line this device is mounted on
    pub line: Arc<Line>,
    /// Product reference, used for vendor specialization
    pub product_id: String,
    /// Ids of the group addresses linked by the device's communication objects.
    ///
    /// These are plain ids; resolve them with a
    /// [`GroupAddressIndex`](crate::GroupAddressIndex).
    pub group_address_ids: Vec<String>,
    /// Texts of the device's communication object references
    pub texts: Vec<String>,
}

impl Device {
    /// Individual address in `area.line.device` notation
    pub fn individual_address(&self) -> String {
        format!("{}.{}.{}", self.line.area.address, self.line.address, self.address)
    }
}

macro_rules! impl_addressable {
    ($name:ident) => {
        impl KnxAddressable for $name {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

impl_addressable!(Area);
impl_addressable!(Line);
impl_addressable!(Device);
