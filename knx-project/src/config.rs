//! Configuration types for the project loader
//!
//! The defaults match current ETS and GIRA exports; everything can be
//! overridden for unusual archives or tests.

use std::path::PathBuf;

use crate::namespace::NamespaceTable;

/// Handling of the write group address of GPA datapoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteAddressPolicy {
    /// Only the read address is emitted
    #[default]
    Ignore,
    /// Emit the write address as well when it is configured and differs from
    /// the read address
    EmitDistinct,
}

/// Configuration for [`KnxProjectLoader`](crate::KnxProjectLoader)
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Known exporter namespaces
    /// Default: ETS 5.6, ETS 5.7 and GIRA GPA
    pub namespaces: NamespaceTable,

    /// Directory extracted documents are written to.
    /// Default: `None`, a fresh temporary directory per load
    pub scratch_dir: Option<PathBuf>,

    /// GPA write address handling
    /// Default: `WriteAddressPolicy::Ignore`
    pub write_address_policy: WriteAddressPolicy,

    /// File name of the ETS project data document
    /// Default: "0.xml"
    pub project_file_name: String,

    /// File name of the ETS project meta document
    /// Default: "project.xml"
    pub meta_file_name: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            namespaces: NamespaceTable::default(),
            scratch_dir: None,
            write_address_policy: WriteAddressPolicy::default(),
            project_file_name: "0.xml".to_string(),
            meta_file_name: "project.xml".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create a new LoaderConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespaces(mut self, namespaces: NamespaceTable) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Extract into `dir` instead of a temporary directory. Files are
    /// overwritten on every load and not removed afterwards.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn with_write_address_policy(mut self, policy: WriteAddressPolicy) -> Self {
        self.write_address_policy = policy;
        self
    }

    pub fn with_project_file_name(mut self, name: impl Into<String>) -> Self {
        self.project_file_name = name.into();
        self
    }

    pub fn with_meta_file_name(mut self, name: impl Into<String>) -> Self {
        self.meta_file_name = name.into();
        self
    }

    /// Project part token, the project file name without extension
    pub fn project_part(&self) -> &str {
        self.project_file_name
            .split('.')
            .next()
            .unwrap_or(&self.project_file_name)
    }
}
