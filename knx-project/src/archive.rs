//! Project archive extraction
//!
//! Both ETS (`.knxproj`) and GIRA (`.gpa`) exports are zip containers of XML
//! documents. The archive kind is detected from the entry names, never from
//! the file extension. Relevant documents are written to a scratch directory
//! and parsed into [`xmltree::Element`] roots.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;
use tracing::{info, warn};
use xmltree::Element;
use zip::ZipArchive;

use crate::config::LoaderConfig;
use crate::error::{ProjectError, Result};

/// Folder prefix of ETS project folders inside the archive
pub const ETS_PROJECT_FOLDER_PREFIX: &str = "P-";

/// Schema family of an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    /// ETS `.knxproj` export
    Ets,
    /// GIRA project assistant `.gpa` export
    Gpa,
}

impl ArchiveKind {
    /// Detect the archive kind from its entry names.
    ///
    /// Any entry below `projects/` or in a `knxdatapoints` folder marks a GPA
    /// export; the descriptor itself is validated during extraction.
    pub fn detect<'a>(entry_names: impl IntoIterator<Item = &'a str>) -> Self {
        if entry_names.into_iter().any(is_gpa_entry) {
            ArchiveKind::Gpa
        } else {
            ArchiveKind::Ets
        }
    }
}

/// Directory extracted documents are written to.
///
/// A temporary scratch directory is unique per load and removed on drop; a
/// caller supplied one is reused and left in place.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    _temp: Option<TempDir>,
}

impl ScratchDir {
    /// Create a fresh temporary directory
    pub fn temporary() -> Result<Self> {
        let temp = tempfile::Builder::new().prefix("knxproj-").tempdir()?;
        Ok(Self {
            path: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    /// Use (and create if needed) a caller supplied directory
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Ok(Self { path, _temp: None })
    }

    /// Scratch directory as configured: the configured directory or a temporary one
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        match &config.scratch_dir {
            Some(dir) => Self::at(dir),
            None => Self::temporary(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self._temp.is_some()
    }
}

/// A document extracted from the archive
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Entry name inside the archive
    pub entry_name: String,
    /// Location of the extracted file
    pub path: PathBuf,
    /// Parsed XML root
    pub root: Element,
}

/// Documents of an ETS export
#[derive(Debug, Clone)]
pub struct EtsDocuments {
    /// `P-xxxx/project.xml`
    pub meta: ExtractedDocument,
    /// `P-xxxx/0.xml`
    pub project: ExtractedDocument,
}

/// Documents of a GIRA export
#[derive(Debug, Clone, Default)]
pub struct GpaDocuments {
    /// `projects/$<token>.xml`
    pub project: Option<ExtractedDocument>,
    /// One document per KNX datapoint
    pub knx_datapoints: Vec<ExtractedDocument>,
    pub internal_datapoints: Vec<ExtractedDocument>,
    pub device_datapoints: Vec<ExtractedDocument>,
    pub logic_nodes: Vec<ExtractedDocument>,
}

/// Result of [`ArchiveExtractor::open`]
#[derive(Debug, Clone)]
pub enum ExtractedDocuments {
    Ets(EtsDocuments),
    Gpa(GpaDocuments),
}

impl ExtractedDocuments {
    pub fn kind(&self) -> ArchiveKind {
        match self {
            ExtractedDocuments::Ets(_) => ArchiveKind::Ets,
            ExtractedDocuments::Gpa(_) => ArchiveKind::Gpa,
        }
    }
}

/// Locates and extracts the project documents of an archive
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    scratch_dir: PathBuf,
    project_file_name: String,
    meta_file_name: String,
}

impl ArchiveExtractor {
    /// Extractor with the default ETS document names
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&LoaderConfig::default(), scratch_dir)
    }

    pub fn from_config(config: &LoaderConfig, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            project_file_name: config.project_file_name.clone(),
            meta_file_name: config.meta_file_name.clone(),
        }
    }

    /// Open the archive at `archive_path` and extract its project documents
    pub fn open(&self, archive_path: &Path) -> Result<ExtractedDocuments> {
        info!("Extracting: {}", archive_path.display());
        let file = File::open(archive_path)?;
        self.open_reader(BufReader::new(file))
    }

    /// Same as [`open`](Self::open) for an in-memory or already opened archive
    pub fn open_reader<R: Read + Seek>(&self, reader: R) -> Result<ExtractedDocuments> {
        let mut archive = ZipArchive::new(reader)?;
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();

        match ArchiveKind::detect(names.iter().map(String::as_str)) {
            ArchiveKind::Ets => self.extract_ets(&mut archive, &names).map(ExtractedDocuments::Ets),
            ArchiveKind::Gpa => self.extract_gpa(&mut archive, &names).map(ExtractedDocuments::Gpa),
        }
    }

    fn extract_ets<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        names: &[String],
    ) -> Result<EtsDocuments> {
        let project_name = single_entry(names, &self.project_file_name)?;
        let meta_name = single_entry(names, &self.meta_file_name)?;

        let project = self.extract(archive, project_name)?;
        let meta = self.extract(archive, meta_name)?;

        info!(
            "knxproj xmls extracted: {} and {}",
            meta.path.display(),
            project.path.display()
        );
        Ok(EtsDocuments { meta, project })
    }

    fn extract_gpa<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        names: &[String],
    ) -> Result<GpaDocuments> {
        let mut documents = GpaDocuments::default();
        let mut projects = Vec::new();

        for name in names.iter().filter(|name| name.ends_with(".xml")) {
            if is_gpa_project_entry(name) {
                projects.push(self.extract(archive, name)?);
            } else if name.contains("knxgroupaddressinformations") {
                // Copy of the ETS information, not needed
                continue;
            } else if name.contains("knxdatapoints") {
                documents.knx_datapoints.push(self.extract(archive, name)?);
            } else if name.contains("internaldatapoints") {
                documents.internal_datapoints.push(self.extract(archive, name)?);
            } else if name.contains("devicedatapoints") {
                documents.device_datapoints.push(self.extract(archive, name)?);
            } else if name.contains("logicnodes") {
                documents.logic_nodes.push(self.extract(archive, name)?);
            } else {
                warn!("Skipping {}", name);
            }
        }

        if projects.len() != 1 {
            return Err(ProjectError::InvalidArchive(format!(
                "expected exactly one project descriptor, found {}",
                projects.len()
            )));
        }
        documents.project = projects.pop();

        info!(
            "gpa xmls extracted: {} knx datapoints, {} internal datapoints, {} device datapoints, {} logic nodes",
            documents.knx_datapoints.len(),
            documents.internal_datapoints.len(),
            documents.device_datapoints.len(),
            documents.logic_nodes.len()
        );
        Ok(documents)
    }

    fn extract<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        name: &str,
    ) -> Result<ExtractedDocument> {
        let mut entry = archive.by_name(name)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ProjectError::InvalidArchive(format!("unsafe entry name: {}", name)))?;

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;

        let path = self.scratch_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &bytes)?;

        let root = Element::parse(bytes.as_slice())?;
        Ok(ExtractedDocument {
            entry_name: name.to_string(),
            path,
            root,
        })
    }
}

/// The single ETS project entry (`P-*/<file_name>`).
fn single_entry<'a>(names: &'a [String], file_name: &str) -> Result<&'a str> {
    let matches: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| is_ets_project_entry(name, file_name))
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        _ => Err(ProjectError::AmbiguousProject {
            document: file_name.to_string(),
            count: matches.len(),
        }),
    }
}

fn is_ets_project_entry(name: &str, file_name: &str) -> bool {
    let mut parts = name.split('/');
    let folder = parts.next().unwrap_or_default();
    folder.starts_with(ETS_PROJECT_FOLDER_PREFIX) && parts.last() == Some(file_name)
}

fn is_gpa_entry(name: &str) -> bool {
    name.starts_with("projects/") || name.split('/').any(|segment| segment == "knxdatapoints")
}

/// Matches `projects/$<token>.xml`
fn is_gpa_project_entry(name: &str) -> bool {
    name.strip_prefix("projects/")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .and_then(|stem| stem.strip_prefix('$'))
        .map(|token| {
            token
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '|' || c == '-')
        })
        .unwrap_or(false)
}
