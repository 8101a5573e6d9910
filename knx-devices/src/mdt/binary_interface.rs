//! MDT 4-fold binary interface (`BE.2D04001`)

use knx_project::{Device, GroupAddress, GroupAddressIndex};

use super::{repeat, BORDER, HSEP, WIDTH};
use crate::error::Result;
use crate::vendor::Switch;

/// A binary interface with its linked group addresses resolved
#[derive(Debug, Clone)]
pub struct BinaryInterface {
    device: Device,
    group_addresses: Vec<GroupAddress>,
}

impl BinaryInterface {
    /// Resolve every linked group address id of `device` against `index`
    pub fn new(device: Device, index: &GroupAddressIndex) -> Result<Self> {
        let group_addresses = index
            .resolve_device(&device)?
            .into_iter()
            .cloned()
            .collect();
        Ok(Self {
            device,
            group_addresses,
        })
    }

    /// Linked group addresses in reference order
    pub fn group_addresses(&self) -> &[GroupAddress] {
        &self.group_addresses
    }
}

impl Switch for BinaryInterface {
    fn device(&self) -> &Device {
        &self.device
    }

    fn render(&self) -> Result<String> {
        let hline = repeat(BORDER, WIDTH);
        let hline_small = repeat(HSEP, WIDTH);

        let mut lines = vec![self.device.name.clone(), hline.clone()];
        for (i, ga) in self.group_addresses.iter().enumerate() {
            if i > 0 {
                lines.push(hline_small.clone());
            }
            lines.push(format!("=> {}{}", ga.id, ga.name));
        }
        lines.push(hline);

        Ok(lines.join("\n"))
    }
}
