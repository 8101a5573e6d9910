//! Model types produced by the project loader

mod group_address;
mod index;
mod topology;

pub use group_address::GroupAddress;
pub use index::GroupAddressIndex;
pub use topology::{Area, Device, Line, DEFAULT_DEVICE_ADDRESS};

/// Attributes shared by every addressable KNX entity
pub trait KnxAddressable {
    /// Archive-local id with the project prefix stripped
    fn id(&self) -> &str;

    /// Human readable label
    fn name(&self) -> &str;
}
