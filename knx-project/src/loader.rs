//! Project loading orchestration
//!
//! [`KnxProjectLoader`] is the entry point of the crate. It extracts an
//! archive, resolves its namespace and runs the factories over the project
//! documents.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use xmltree::Element;

use crate::archive::{ArchiveExtractor, ArchiveKind, EtsDocuments, ExtractedDocuments, GpaDocuments, ScratchDir};
use crate::config::LoaderConfig;
use crate::error::{ProjectError, Result};
use crate::factory::{DatapointFactory, GroupAddressFactory, TopologyFactory};
use crate::finder::{optional_attribute, required_attribute, NamespacedFinder};
use crate::gpa::GpaInfo;
use crate::model::{Device, GroupAddress, GroupAddressIndex};
use crate::namespace::{Namespace, NamespaceResolver, GPA_KEY};

/// Meta information of an ETS project (`project.xml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMeta {
    /// Exporting tool, e.g. `ETS5`
    pub created_by: String,
    pub tool_version: String,
    /// Project id, e.g. `P-0123`
    pub project_id: String,
    /// Project name from `ProjectInformation`, if present
    pub name: Option<String>,
    pub namespace: Namespace,
    /// Attributes of the root, `Project` and `ProjectInformation` elements
    pub attributes: BTreeMap<String, String>,
}

impl ProjectMeta {
    /// Read the meta document and resolve the namespace it declares
    pub fn from_document(resolver: &NamespaceResolver, root: &Element) -> Result<Self> {
        let created_by = required_attribute(root, "CreatedBy")?;
        let tool_version = required_attribute(root, "ToolVersion")?;
        let namespace = resolver.resolve(created_by, tool_version)?;
        let finder = NamespacedFinder::new(&namespace);

        let mut attributes: BTreeMap<String, String> = root.attributes.clone().into_iter().collect();

        let project = finder.find_one(root, "Project")?;
        let project_id = required_attribute(project, "Id")?.to_string();
        attributes.extend(project.attributes.clone());

        let information = finder.find_optional(project, "ProjectInformation")?;
        let name = information
            .and_then(|info| optional_attribute(info, "Name"))
            .map(str::to_string);
        if let Some(information) = information {
            attributes.extend(information.attributes.clone());
        }

        Ok(Self {
            created_by: created_by.to_string(),
            tool_version: tool_version.to_string(),
            project_id,
            name,
            namespace,
            attributes,
        })
    }

    /// Log all collected meta attributes at info level
    pub fn log(&self) {
        info!("Project meta information:");
        for (key, value) in &self.attributes {
            info!("\t{}: {}", key, value);
        }
    }
}

/// A loaded project
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub kind: ArchiveKind,
    /// Group addresses sorted by id
    pub group_addresses: Vec<GroupAddress>,
    /// Devices sorted by address; always empty for GPA exports
    pub devices: Vec<Device>,
    /// Meta information, ETS exports only
    pub meta: Option<ProjectMeta>,
    /// Project summary, GPA exports only
    pub gpa_info: Option<GpaInfo>,
}

impl Project {
    /// Split into group addresses and devices
    pub fn into_parts(self) -> (Vec<GroupAddress>, Vec<Device>) {
        (self.group_addresses, self.devices)
    }

    /// Index for resolving the group address ids referenced by devices
    pub fn group_address_index(&self) -> GroupAddressIndex {
        GroupAddressIndex::new(&self.group_addresses)
    }
}

/// Loads ETS and GPA project archives.
///
/// # Examples
///
/// ```no_run
/// use knx_project::KnxProjectLoader;
///
/// let project = KnxProjectLoader::new().load("home.knxproj")?;
/// for ga in &project.group_addresses {
///     println!("{}: {} ({})", ga, ga.name, ga.dtype);
/// }
/// # Ok::<(), knx_project::ProjectError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnxProjectLoader {
    config: LoaderConfig,
    resolver: NamespaceResolver,
}

impl KnxProjectLoader {
    /// Loader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        let resolver = NamespaceResolver::new(config.namespaces.clone());
        Self { config, resolver }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the archive at `archive_path`.
    ///
    /// Errors of the extraction and the factories are returned unchanged; the
    /// scratch directory of the load is removed afterwards unless it was
    /// supplied through the configuration.
    pub fn load(&self, archive_path: impl AsRef<Path>) -> Result<Project> {
        let scratch = ScratchDir::from_config(&self.config)?;
        let extractor = ArchiveExtractor::from_config(&self.config, scratch.path());

        match extractor.open(archive_path.as_ref())? {
            ExtractedDocuments::Ets(documents) => self.load_ets(&documents),
            ExtractedDocuments::Gpa(documents) => self.load_gpa(&documents),
        }
    }

    fn load_ets(&self, documents: &EtsDocuments) -> Result<Project> {
        let meta = ProjectMeta::from_document(&self.resolver, &documents.meta.root)?;
        meta.log();

        if !documents.project.entry_name.contains(&meta.project_id)
            || !documents.meta.entry_name.contains(&meta.project_id)
        {
            return Err(ProjectError::InconsistentProjectId(meta.project_id.clone()));
        }

        let prefix = format!("{}-{}", meta.project_id, self.config.project_part());
        let finder = NamespacedFinder::new(&meta.namespace);
        let root = &documents.project.root;

        let group_addresses = ets_group_addresses(&finder, root, &prefix)?;
        let devices = ets_devices(&finder, root, &prefix)?;
        info!(
            "Loaded {} group addresses and {} devices",
            group_addresses.len(),
            devices.len()
        );

        Ok(Project {
            kind: ArchiveKind::Ets,
            group_addresses,
            devices,
            meta: Some(meta),
            gpa_info: None,
        })
    }

    fn load_gpa(&self, documents: &GpaDocuments) -> Result<Project> {
        let namespace = self.resolver.resolve_key(GPA_KEY)?;
        let finder = NamespacedFinder::new(&namespace);

        let factory = DatapointFactory::new(finder.clone(), self.config.write_address_policy);
        let mut group_addresses = Vec::new();
        for document in &documents.knx_datapoints {
            group_addresses.extend(factory.from_datapoint_document(&document.root)?);
        }
        group_addresses.sort_by(|a, b| a.id.cmp(&b.id));
        info!("Loaded {} group addresses", group_addresses.len());

        let info = GpaInfo::collect(&finder, documents);
        info.log();

        Ok(Project {
            kind: ArchiveKind::Gpa,
            group_addresses,
            devices: Vec::new(),
            meta: None,
            gpa_info: Some(info),
        })
    }
}

/// Walk `GroupAddresses -> GroupRanges -> GroupRange -> GroupRange -> GroupAddress`
fn ets_group_addresses(
    finder: &NamespacedFinder,
    root: &Element,
    prefix: &str,
) -> Result<Vec<GroupAddress>> {
    let factory = GroupAddressFactory::new(prefix);
    let groups = finder.find_unique_descendant(root, "GroupAddresses")?;
    let ranges = finder.find_one(groups, "GroupRanges")?;

    let mut group_addresses = Vec::new();
    for main_range in finder.find_all(ranges, "GroupRange") {
        for middle_range in finder.find_all(main_range, "GroupRange") {
            for element in finder.find_all(middle_range, "GroupAddress") {
                group_addresses.push(factory.from_element(element)?);
            }
        }
    }

    group_addresses.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(group_addresses)
}

/// Walk `Topology -> Area -> Line -> DeviceInstance`
fn ets_devices(finder: &NamespacedFinder, root: &Element, prefix: &str) -> Result<Vec<Device>> {
    let factory = TopologyFactory::new(finder.clone(), prefix);
    let topology = finder.find_unique_descendant(root, "Topology")?;

    let mut devices = Vec::new();
    for area_element in finder.find_all(topology, "Area") {
        let area = Arc::new(factory.area(area_element)?);

        for line_element in finder.find_all(area_element, "Line") {
            let line = Arc::new(factory.line(line_element, Arc::clone(&area))?);

            for device_element in finder.find_all(line_element, "DeviceInstance") {
                devices.push(factory.device(device_element, Arc::clone(&line))?);
            }
        }
    }

    devices.sort_by_key(|device| device.address);
    debug!("Topology yields {} devices", devices.len());
    Ok(devices)
}
