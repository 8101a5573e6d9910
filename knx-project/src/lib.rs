//! KNX Project Loader
//!
//! Reads exported KNX installation projects and turns them into a typed model
//! of group addresses and devices.
//!
//! # Supported archives
//!
//! - **ETS** (`.knxproj`): ETS 5.6 and 5.7 exports, group addresses and topology
//! - **GIRA** (`.gpa`): GIRA project assistant exports, group addresses only
//!
//! The archive kind is detected from the zip entries, not from the file
//! extension.
//!
//! # Architecture
//!
//! ```text
//! archive → ArchiveExtractor → NamespaceResolver → factories → Project
//!           (scratch dir)      (ets56/ets57/gpa)   (GA, topology)
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use knx_project::{KnxProjectLoader, LoaderConfig};
//!
//! let loader = KnxProjectLoader::with_config(LoaderConfig::new());
//! let project = loader.load("home.knxproj")?;
//!
//! let index = project.group_address_index();
//! for device in &project.devices {
//!     for ga in index.resolve_device(device)? {
//!         println!("{} {} -> {} {}", device.individual_address(), device.name, ga, ga.name);
//!     }
//! }
//! ```

pub mod archive;
pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod factory;
pub mod finder;
pub mod gpa;
pub mod loader;
pub mod logging;
pub mod model;
pub mod namespace;

pub use archive::{ArchiveExtractor, ArchiveKind, ExtractedDocuments, ScratchDir};
pub use compare::{compare_group_addresses, Comparison, Mismatch};
pub use config::{LoaderConfig, WriteAddressPolicy};
pub use error::{ProjectError, Result};
pub use finder::NamespacedFinder;
pub use gpa::{GpaInfo, InternalDataPoint};
pub use loader::{KnxProjectLoader, Project, ProjectMeta};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use model::{
    Area, Device, GroupAddress, GroupAddressIndex, KnxAddressable, Line, DEFAULT_DEVICE_ADDRESS,
};
pub use namespace::{Namespace, NamespaceResolver, NamespaceTable};
