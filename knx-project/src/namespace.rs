//! XML namespace resolution for the supported exporter versions
//!
//! Every exporting tool writes its project documents under its own XML
//! namespace. The namespace is selected by a key derived from the archive
//! meta data (`ets56`, `ets57`) or fixed by the archive kind (`gpa`).

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ProjectError, Result};

/// Key of the GIRA project namespace
pub const GPA_KEY: &str = "gpa";

/// Immutable mapping of namespace key to XML namespace URI.
///
/// The default table covers ETS 5.6, ETS 5.7 and GIRA GPA exports. Tests and
/// callers with other exports can build their own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    entries: BTreeMap<String, String>,
}

impl NamespaceTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return a copy of this table with one more entry
    pub fn with_entry(mut self, key: impl Into<String>, uri: impl Into<String>) -> Self {
        self.entries.insert(key.into(), uri.into());
        self
    }

    /// Look up the namespace URI for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All known keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::empty()
            .with_entry("ets56", "http://knx.org/xml/project/14")
            .with_entry("ets57", "http://knx.org/xml/project/20")
            .with_entry(GPA_KEY, "http://service.schema.gira.de/configuration")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NamespaceTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A resolved namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    /// Table key, e.g. `ets57`
    pub key: String,
    /// XML namespace URI
    pub uri: String,
}

/// Maps exporter tool identifiers onto namespaces of a [`NamespaceTable`]
#[derive(Debug, Clone, Default)]
pub struct NamespaceResolver {
    table: NamespaceTable,
}

impl NamespaceResolver {
    pub fn new(table: NamespaceTable) -> Self {
        Self { table }
    }

    /// Resolve the namespace of an ETS export.
    ///
    /// `created_by` is the meta document's `CreatedBy` attribute (e.g. `ETS5`)
    /// and `tool_version` its `ToolVersion` (e.g. `5.7.293.38`). The key is the
    /// lower-cased tool name followed by the second version segment.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::UnsupportedVersion` if the derived key is unknown.
    pub fn resolve(&self, created_by: &str, tool_version: &str) -> Result<Namespace> {
        let key = version_key(created_by, tool_version)?;
        self.resolve_key(&key)
    }

    /// Resolve a namespace directly by its table key
    pub fn resolve_key(&self, key: &str) -> Result<Namespace> {
        match self.table.get(key) {
            Some(uri) => Ok(Namespace {
                key: key.to_string(),
                uri: uri.to_string(),
            }),
            None => Err(ProjectError::UnsupportedVersion(key.to_string())),
        }
    }

    pub fn table(&self) -> &NamespaceTable {
        &self.table
    }
}

/// Derive the namespace key from the exporter name and version
pub fn version_key(created_by: &str, tool_version: &str) -> Result<String> {
    let minor = tool_version
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| {
            ProjectError::UnsupportedVersion(format!("{} {}", created_by, tool_version))
        })?;
    Ok(format!("{}{}", created_by.to_lowercase(), minor))
}
