//! Classification of generic devices into vendor variants

use knx_project::{Device, GroupAddressIndex};
use tracing::debug;

use crate::error::Result;
use crate::mdt::{BinaryInterface, GlassPushButton};

/// Product id marker of the MDT glass push button II
pub const GLASS_PUSH_BUTTON_MARKER: &str = "GT2";
/// Product id marker of the MDT 4-fold binary interface
pub const BINARY_INTERFACE_MARKER: &str = "BE.2D04001";

/// Known device families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorKind {
    Generic,
    /// MDT glass push button II
    TouchPanel,
    /// MDT 4-fold binary interface
    BinaryInterface,
}

/// Classify a device by its product id
pub fn classify(product_id: &str) -> VendorKind {
    if product_id.contains(GLASS_PUSH_BUTTON_MARKER) {
        VendorKind::TouchPanel
    } else if product_id.contains(BINARY_INTERFACE_MARKER) {
        VendorKind::BinaryInterface
    } else {
        VendorKind::Generic
    }
}

/// A device that can render a human readable overview
pub trait Switch {
    /// The underlying generic device
    fn device(&self) -> &Device;

    /// Render the overview as text
    fn render(&self) -> Result<String>;
}

/// A device, specialized where the product is known
#[derive(Debug, Clone)]
pub enum VendorDevice {
    Generic(Device),
    TouchPanel(GlassPushButton),
    BinaryInterface(BinaryInterface),
}

impl VendorDevice {
    pub fn kind(&self) -> VendorKind {
        match self {
            VendorDevice::Generic(_) => VendorKind::Generic,
            VendorDevice::TouchPanel(_) => VendorKind::TouchPanel,
            VendorDevice::BinaryInterface(_) => VendorKind::BinaryInterface,
        }
    }

    pub fn device(&self) -> &Device {
        match self {
            VendorDevice::Generic(device) => device,
            VendorDevice::TouchPanel(panel) => panel.device(),
            VendorDevice::BinaryInterface(interface) => interface.device(),
        }
    }

    /// The renderable variant, `None` for generic devices
    pub fn as_switch(&self) -> Option<&dyn Switch> {
        match self {
            VendorDevice::Generic(_) => None,
            VendorDevice::TouchPanel(panel) => Some(panel as &dyn Switch),
            VendorDevice::BinaryInterface(interface) => Some(interface as &dyn Switch),
        }
    }
}

/// Specialize `device` according to [`classify`].
///
/// Unrecognized products are returned as [`VendorDevice::Generic`].
///
/// # Errors
///
/// A binary interface linking a group address id missing from `index` fails
/// with `ProjectError::UnresolvedGroupAddress`.
pub fn resolve_vendor(device: Device, index: &GroupAddressIndex) -> Result<VendorDevice> {
    let kind = classify(&device.product_id);
    debug!("{} ({}) is {:?}", device.name, device.product_id, kind);

    Ok(match kind {
        VendorKind::Generic => VendorDevice::Generic(device),
        VendorKind::TouchPanel => VendorDevice::TouchPanel(GlassPushButton::new(device)?),
        VendorKind::BinaryInterface => {
            VendorDevice::BinaryInterface(BinaryInterface::new(device, index)?)
        }
    })
}
