//! Informational sections of GIRA project exports
//!
//! Besides the KNX datapoints a GPA export carries device datapoints,
//! internal datapoints and logic nodes. They are not part of the group
//! address model but are summarized for display.

use serde::Serialize;
use tracing::{info, warn};
use xmltree::Element;

use crate::archive::GpaDocuments;
use crate::error::{ProjectError, Result};
use crate::finder::NamespacedFinder;

/// An enabled internal datapoint of a GPA project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalDataPoint {
    pub name: String,
    /// Content of `KnxIntegration`
    pub knx: String,
    pub id: String,
    /// Last `.` separated token of `ValueTypeUrn`
    pub value_type: String,
}

/// Summary of a GPA project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GpaInfo {
    pub name: Option<String>,
    pub author: Option<String>,
    pub last_modified: Option<String>,
    /// Device datapoints that are enabled and integrated into KNX
    pub device_datapoints: usize,
    pub internal_datapoints: Vec<InternalDataPoint>,
    pub logic_nodes: usize,
}

impl GpaInfo {
    /// Collect the summary from extracted GPA documents.
    ///
    /// The sections are informational only: a document that does not follow
    /// the expected layout is logged and left out of the summary.
    pub fn collect(finder: &NamespacedFinder, documents: &GpaDocuments) -> Self {
        let mut summary = GpaInfo {
            logic_nodes: documents.logic_nodes.len(),
            ..Default::default()
        };

        if let Some(project) = &documents.project {
            let root = &project.root;
            summary.name = best_effort(&project.entry_name, finder.optional_child_text(root, "EntityName")).flatten();
            summary.author = best_effort(&project.entry_name, finder.optional_child_text(root, "Author")).flatten();
            summary.last_modified =
                best_effort(&project.entry_name, finder.optional_child_text(root, "LastModified")).flatten();
        }

        for document in &documents.device_datapoints {
            if best_effort(&document.entry_name, device_datapoint_used(finder, &document.root)) == Some(true) {
                summary.device_datapoints += 1;
            }
        }

        for document in &documents.internal_datapoints {
            if let Some(Some(datapoint)) =
                best_effort(&document.entry_name, internal_datapoint(finder, &document.root))
            {
                summary.internal_datapoints.push(datapoint);
            }
        }

        summary
    }

    /// Log the summary at info level
    pub fn log(&self) {
        info!(
            "Project '{}', created by '{}', last changed on '{}'.",
            self.name.as_deref().unwrap_or("?"),
            self.author.as_deref().unwrap_or("?"),
            self.last_modified.as_deref().unwrap_or("?"),
        );
        info!("{} device datapoints are existent.", self.device_datapoints);
        if !self.internal_datapoints.is_empty() {
            info!("{} internal datapoints are existent.", self.internal_datapoints.len());
            for datapoint in &self.internal_datapoints {
                info!("\t{:?}", datapoint);
            }
        }
    }
}

fn best_effort<T>(entry_name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping {}: {}", entry_name, e);
            None
        }
    }
}

/// True if the device datapoint is enabled and integrated into KNX
fn device_datapoint_used(finder: &NamespacedFinder, root: &Element) -> Result<bool> {
    expect_root(root, "DeviceDataPoint")?;
    let enabled = flag(finder, root, "Enabled")?.unwrap_or(false);
    let used = flag(finder, root, "KnxIntegration")?.unwrap_or(false);
    Ok(enabled && used)
}

/// The internal datapoint, `None` if it is disabled
fn internal_datapoint(finder: &NamespacedFinder, root: &Element) -> Result<Option<InternalDataPoint>> {
    expect_root(root, "InternalDataPoint")?;
    if flag(finder, root, "Enabled")? == Some(false) {
        return Ok(None);
    }

    let value_type = finder.child_text(root, "ValueTypeUrn")?;
    Ok(Some(InternalDataPoint {
        name: finder.child_text(root, "EntityName")?,
        knx: finder.child_text(root, "KnxIntegration")?,
        id: finder.child_text(root, "EntityId")?,
        value_type: value_type.rsplit('.').next().unwrap_or_default().to_string(),
    }))
}

fn expect_root(root: &Element, tag: &str) -> Result<()> {
    if root.name.contains(tag) {
        Ok(())
    } else {
        Err(ProjectError::Schema(format!(
            "expected a {} document, found '{}'",
            tag, root.name
        )))
    }
}

fn flag(finder: &NamespacedFinder, root: &Element, local_name: &str) -> Result<Option<bool>> {
    Ok(finder
        .optional_child_text(root, local_name)?
        .map(|text| text == "true"))
}
