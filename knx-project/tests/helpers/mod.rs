//! Builders for synthetic project archives used by the integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const ETS56_NS: &str = "http://knx.org/xml/project/14";
pub const ETS57_NS: &str = "http://knx.org/xml/project/20";
pub const GPA_NS: &str = "http://service.schema.gira.de/configuration";

pub const PROJECT_ID: &str = "P-0123";

/// A group address leaf of the ETS group range tree
#[derive(Debug, Clone)]
pub struct GaSpec {
    pub id: String,
    pub name: String,
    pub address: u16,
    pub dtype: Option<String>,
}

impl GaSpec {
    pub fn new(id: &str, name: &str, address: u16, dtype: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            address,
            dtype: Some(dtype.to_string()),
        }
    }

    pub fn without_dtype(mut self) -> Self {
        self.dtype = None;
        self
    }

    fn to_xml(&self) -> String {
        let dtype = self
            .dtype
            .as_ref()
            .map(|dtype| format!(r#" DatapointType="{}""#, dtype))
            .unwrap_or_default();
        format!(
            r#"<GroupAddress Id="{}-0_{}" Name="{}" Address="{}"{}/>"#,
            PROJECT_ID, self.id, self.name, self.address, dtype
        )
    }
}

/// A device instance of the ETS topology
#[derive(Debug, Clone)]
pub struct DeviceSpec {
    pub id: String,
    pub name: String,
    pub address: Option<u16>,
    pub product_id: String,
    /// `(Links, Text)` of each communication object reference
    pub references: Vec<(String, String)>,
}

impl DeviceSpec {
    pub fn new(id: &str, name: &str, address: Option<u16>, product_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            address,
            product_id: product_id.to_string(),
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, links: &str, text: &str) -> Self {
        self.references.push((links.to_string(), text.to_string()));
        self
    }

    fn to_xml(&self) -> String {
        let address = self
            .address
            .map(|address| format!(r#" Address="{}""#, address))
            .unwrap_or_default();
        let references = if self.references.is_empty() {
            String::new()
        } else {
            let refs: String = self
                .references
                .iter()
                .map(|(links, text)| {
                    format!(r#"<ComObjectInstanceRef Links="{}" Text="{}"/>"#, links, text)
                })
                .collect();
            format!("<ComObjectInstanceRefs>{}</ComObjectInstanceRefs>", refs)
        };
        format!(
            r#"<DeviceInstance Id="{}-0_{}" Name="{}"{} ProductRefId="{}">{}</DeviceInstance>"#,
            PROJECT_ID, self.id, self.name, address, self.product_id, references
        )
    }
}

pub fn ets_meta_xml(namespace: &str, created_by: &str, tool_version: &str, project_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<KNX xmlns="{}" CreatedBy="{}" ToolVersion="{}">
  <Project Id="{}">
    <ProjectInformation Name="Synthetic home" GroupAddressStyle="ThreeLevel"/>
  </Project>
</KNX>"#,
        namespace, created_by, tool_version, project_id
    )
}

/// Project document with one area, one line and one main/middle range
pub fn ets_project_xml(namespace: &str, group_addresses: &[GaSpec], devices: &[DeviceSpec]) -> String {
    let gas: String = group_addresses.iter().map(GaSpec::to_xml).collect();
    let devices: String = devices.iter().map(DeviceSpec::to_xml).collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<KNX xmlns="{ns}">
  <Project Id="{id}">
    <Installations>
      <Installation Name="">
        <Topology>
          <Area Id="{id}-0_A-1" Name="Building" Address="1">
            <Line Id="{id}-0_L-1" Name="Ground floor" Address="1" MediumTypeRefId="MT-0">{devices}</Line>
          </Area>
        </Topology>
        <GroupAddresses>
          <GroupRanges>
            <GroupRange Id="{id}-0_GR-1" Name="Lights" RangeStart="1" RangeEnd="2047">
              <GroupRange Id="{id}-0_GR-2" Name="Switching" RangeStart="1" RangeEnd="255">{gas}</GroupRange>
            </GroupRange>
          </GroupRanges>
        </GroupAddresses>
      </Installation>
    </Installations>
  </Project>
</KNX>"#,
        ns = namespace,
        id = PROJECT_ID,
        devices = devices,
        gas = gas,
    )
}

/// Archive entries of a regular ETS 5.7 export
pub fn ets_entries(group_addresses: &[GaSpec], devices: &[DeviceSpec]) -> Vec<(String, String)> {
    vec![
        ("knx_master.xml".to_string(), "<KNX/>".to_string()),
        (
            format!("{}/project.xml", PROJECT_ID),
            ets_meta_xml(ETS57_NS, "ETS5", "5.7.293.38", PROJECT_ID),
        ),
        (
            format!("{}/0.xml", PROJECT_ID),
            ets_project_xml(ETS57_NS, group_addresses, devices),
        ),
    ]
}

pub fn gpa_project_xml(name: &str) -> String {
    format!(
        r#"<Project xmlns="{}"><EntityName>{}</EntityName><Author>installer</Author><LastModified>2020-04-01T12:00:00</LastModified></Project>"#,
        GPA_NS, name
    )
}

pub fn gpa_datapoint_xml(id: &str, name: &str, read: u16, write: u16, dtype: &str) -> String {
    format!(
        r#"<KnxDataPoint xmlns="{}"><EntityId>{}</EntityId><EntityName>{}</EntityName><ReadGroupAddress>{}</ReadGroupAddress><WriteGroupAddress>{}</WriteGroupAddress><DataTypeKnx>{}</DataTypeKnx></KnxDataPoint>"#,
        GPA_NS, id, name, read, write, dtype
    )
}

/// Temporary directory holding the archives of one test
pub struct ArchiveDir {
    dir: TempDir,
}

impl ArchiveDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write a zip archive with the given entries and return its path
    pub fn write_archive(&self, file_name: &str, entries: &[(String, String)]) -> PathBuf {
        let path = self.dir.path().join(file_name);
        let file = File::create(&path).expect("Failed to create archive");
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("Failed to start entry");
            writer
                .write_all(content.as_bytes())
                .expect("Failed to write entry");
        }
        writer.finish().expect("Failed to finish archive");
        path
    }
}
