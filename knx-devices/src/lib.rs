//! Vendor specific KNX devices
//!
//! Generic [`Device`](knx_project::Device)s loaded by `knx-project` carry a
//! product id. Some products are recognized and turned into richer variants
//! that can render an overview of their configuration:
//!
//! - MDT glass push button II (`GT2`): button labels per page
//! - MDT 4-fold binary interface (`BE.2D04001`): linked group addresses
//!
//! ```rust,ignore
//! use knx_devices::{resolve_vendor, Switch};
//! use knx_project::KnxProjectLoader;
//!
//! let project = KnxProjectLoader::new().load("home.knxproj")?;
//! let index = project.group_address_index();
//! for device in project.devices.iter().cloned() {
//!     if let Some(switch) = resolve_vendor(device, &index)?.as_switch() {
//!         println!("{}", switch.render()?);
//!     }
//! }
//! ```

pub mod error;
pub mod mdt;
pub mod vendor;

pub use error::{DeviceError, Result};
pub use mdt::{BinaryInterface, GlassPushButton, PanelLayout};
pub use vendor::{classify, resolve_vendor, Switch, VendorDevice, VendorKind};
