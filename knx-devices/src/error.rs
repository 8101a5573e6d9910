//! Error types for vendor specific devices

use knx_project::ProjectError;
use thiserror::Error;

/// Errors that can occur while specializing or rendering devices
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Texts of a device did not fit any known button layout
    #[error("Could not consume all texts of '{device}': {texts:?}")]
    UnconsumedTexts { device: String, texts: Vec<String> },

    /// A text pattern failed to compile
    #[error("Invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Resolving project data failed
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Result type alias for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;
