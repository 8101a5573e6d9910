//! KNX group address type
//!
//! Group addresses are stored as the raw 16-bit value found in the project
//! archive and decomposed on demand into the three-level form:
//! - Main: 5 bits (0-31)
//! - Middle: 3 bits (0-7)
//! - Sub: 8 bits (0-255)

use serde::Serialize;
use std::fmt;

use super::KnxAddressable;
use crate::error::{ProjectError, Result};

/// A group address with its label and datapoint type.
///
/// # Examples
///
/// ```
/// use knx_project::GroupAddress;
///
/// let ga = GroupAddress::new("GA-1", "Light", 0x0A03, "DPST-1-1");
/// assert_eq!(ga.main(), 1);
/// assert_eq!(ga.middle(), 2);
/// assert_eq!(ga.sub(), 3);
/// assert_eq!(ga.to_string(), "1/2/3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupAddress {
    /// Archive-local identifier, project prefix stripped
    pub id: String,
    /// Human readable label
    pub name: String,
    /// Raw packed address
    pub address: u16,
    /// Datapoint type, `DPST-<main>-<sub>` or `DPT-<main>`
    pub dtype: String,
}

impl GroupAddress {
    /// Maximum main group value (5 bits)
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group value (3 bits)
    pub const MAX_MIDDLE: u8 = 7;

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: u16,
        dtype: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address,
            dtype: dtype.into(),
        }
    }

    /// Main group component (0-31)
    #[inline]
    pub const fn main(&self) -> u8 {
        ((self.address >> 11) & 0x1F) as u8
    }

    /// Middle group component (0-7)
    #[inline]
    pub const fn middle(&self) -> u8 {
        ((self.address >> 8) & 0x07) as u8
    }

    /// Sub group component (0-255)
    #[inline]
    pub const fn sub(&self) -> u8 {
        (self.address & 0xFF) as u8
    }

    /// Pack three-level components into the raw address.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidAttribute` if main or middle are out of range.
    pub fn pack(main: u8, middle: u8, sub: u8) -> Result<u16> {
        if main > Self::MAX_MAIN || middle > Self::MAX_MIDDLE {
            return Err(ProjectError::invalid_attribute(
                "GroupAddress",
                &format!("{}/{}/{}", main, middle, sub),
            ));
        }
        Ok((u16::from(main) << 11) | (u16::from(middle) << 8) | u16::from(sub))
    }

    /// Parse the `main/middle/sub` text form into the raw address
    pub fn parse_address(text: &str) -> Result<u16> {
        let invalid = || ProjectError::invalid_attribute("GroupAddress", text);

        let parts: Vec<u8> = text
            .split('/')
            .map(|part| part.trim().parse::<u8>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [main, middle, sub] => Self::pack(*main, *middle, *sub),
            _ => Err(invalid()),
        }
    }

    /// First two `-` separated tokens of the dtype, e.g. `DPST-1` for `DPST-1-1`
    pub fn dtype_main_group(&self) -> Vec<&str> {
        self.dtype.split('-').take(2).collect()
    }

    /// Loose comparison used to match the same address across exports.
    ///
    /// True if both addresses are identical, the dtypes share their main
    /// group and one name contains the other.
    pub fn almost_equal(&self, other: &GroupAddress) -> bool {
        if self.address != other.address {
            return false;
        }
        if self.dtype_main_group() != other.dtype_main_group() {
            return false;
        }
        self.name.contains(other.name.as_str()) || other.name.contains(self.name.as_str())
    }
}

impl KnxAddressable for GroupAddress {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}
