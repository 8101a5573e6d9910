//! Error types for project archive loading

use thiserror::Error;

/// Errors that can occur while loading a KNX project archive
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The exporting tool/version has no known XML namespace
    #[error("Unsupported namespace (probably version): {0}")]
    UnsupportedVersion(String),

    /// Zero or several candidate documents for a single project descriptor
    #[error("Expected exactly one {document} in the archive, found {count}")]
    AmbiguousProject { document: String, count: usize },

    /// The archive does not have the expected layout
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// Project id in the meta document does not match the extracted paths
    #[error("Inconsistent project id found: {0}")]
    InconsistentProjectId(String),

    /// An element lookup did not return exactly one match
    #[error("Expected exactly one '{keyword}' element, found {count}")]
    NotFound { keyword: String, count: usize },

    /// A required XML attribute is absent
    #[error("Missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute { element: String, attribute: String },

    /// A required XML element has no text content
    #[error("Missing text content in element '{0}'")]
    MissingText(String),

    /// An attribute or text value could not be converted
    #[error("Invalid value '{value}' for '{attribute}'")]
    InvalidAttribute { attribute: String, value: String },

    /// A group address carries no datapoint type
    #[error("Group address '{name}' has no DatapointType")]
    MissingDatapointType { name: String },

    /// A document does not follow the expected schema
    #[error("Schema violation: {0}")]
    Schema(String),

    /// A referenced group address id is not part of the project
    #[error("Unknown group address id: {0}")]
    UnresolvedGroupAddress(String),

    /// Reading or writing extracted files failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container could not be read
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An XML document is malformed
    #[error("XML parsing failed: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// Serializing an export failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectError {
    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        ProjectError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub(crate) fn invalid_attribute(attribute: &str, value: &str) -> Self {
        ProjectError::InvalidAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for project loading operations
pub type Result<T> = std::result::Result<T, ProjectError>;
