//! Vendor specialization of devices loaded from a synthetic ETS archive

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use knx_devices::{resolve_vendor, DeviceError, VendorDevice, VendorKind};
use knx_project::{KnxProjectLoader, Project};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NS: &str = "http://knx.org/xml/project/20";

fn write_archive(dir: &Path, devices: &str) -> PathBuf {
    let meta = format!(
        r#"<KNX xmlns="{}" CreatedBy="ETS5" ToolVersion="5.7.293.38"><Project Id="P-0001"/></KNX>"#,
        NS
    );
    let project = format!(
        r#"<KNX xmlns="{ns}"><Project Id="P-0001"><Installations><Installation>
            <Topology>
                <Area Id="P-0001-0_A-1" Name="House" Address="1">
                    <Line Id="P-0001-0_L-1" Name="Main" Address="1" MediumTypeRefId="MT-0">{devices}</Line>
                </Area>
            </Topology>
            <GroupAddresses><GroupRanges><GroupRange><GroupRange>
                <GroupAddress Id="P-0001-0_GA-1" Name="Window" Address="2049" DatapointType="DPST-1-19"/>
                <GroupAddress Id="P-0001-0_GA-2" Name="Light" Address="2050" DatapointType="DPST-1-1"/>
            </GroupRange></GroupRange></GroupRanges></GroupAddresses>
        </Installation></Installations></Project></KNX>"#,
        ns = NS,
        devices = devices
    );

    let path = dir.join("home.knxproj");
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    for (name, content) in [("P-0001/project.xml", meta), ("P-0001/0.xml", project)] {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

fn load(devices: &str) -> Project {
    let dir = tempfile::tempdir().unwrap();
    let archive = write_archive(dir.path(), devices);
    KnxProjectLoader::new().load(&archive).unwrap()
}

const DEVICES: &str = r#"
    <DeviceInstance Id="P-0001-0_D-1" Name="Kitchen" Address="1" ProductRefId="M-0083_H-GT2.2D...">
        <ComObjectInstanceRefs>
            <ComObjectInstanceRef Links="GA-2" Text="T1: Light"/>
            <ComObjectInstanceRef Text="Status LED"/>
        </ComObjectInstanceRefs>
    </DeviceInstance>
    <DeviceInstance Id="P-0001-0_D-2" Name="Inputs" Address="2" ProductRefId="M-0083_H-BE.2D04001">
        <ComObjectInstanceRefs>
            <ComObjectInstanceRef Links="GA-1"/>
        </ComObjectInstanceRefs>
    </DeviceInstance>
    <DeviceInstance Id="P-0001-0_D-3" Name="Actuator" Address="3" ProductRefId="M-0083_H-AKS"/>
"#;

#[test]
fn test_resolve_vendor_devices() {
    let project = load(DEVICES);
    let index = project.group_address_index();

    let devices: Vec<VendorDevice> = project
        .devices
        .iter()
        .cloned()
        .map(|device| resolve_vendor(device, &index).unwrap())
        .collect();

    let kinds: Vec<VendorKind> = devices.iter().map(VendorDevice::kind).collect();
    assert_eq!(
        kinds,
        vec![
            VendorKind::TouchPanel,
            VendorKind::BinaryInterface,
            VendorKind::Generic
        ]
    );
    assert!(devices[2].as_switch().is_none());

    let panel = devices[0].as_switch().unwrap().render().unwrap();
    assert!(panel.starts_with("Kitchen 1/1\n"));
    assert!(panel.contains("Light"));

    let interface = devices[1].as_switch().unwrap().render().unwrap();
    assert!(interface.contains("=> GA-1Window"));
    assert_eq!(devices[1].device().name, "Inputs");
}

#[test]
fn test_unknown_panel_text_fails_on_render() {
    let project = load(
        r#"<DeviceInstance Id="P-0001-0_D-1" Name="Kitchen" Address="1" ProductRefId="M-0083_H-GT2">
            <ComObjectInstanceRefs><ComObjectInstanceRef Text="Free text"/></ComObjectInstanceRefs>
        </DeviceInstance>"#,
    );
    let index = project.group_address_index();
    let device = resolve_vendor(project.devices[0].clone(), &index).unwrap();

    assert!(matches!(
        device.as_switch().unwrap().render(),
        Err(DeviceError::UnconsumedTexts { .. })
    ));
}

#[test]
fn test_unresolved_binary_interface_link() {
    let project = load(
        r#"<DeviceInstance Id="P-0001-0_D-2" Name="Inputs" Address="2" ProductRefId="M-0083_H-BE.2D04001">
            <ComObjectInstanceRefs><ComObjectInstanceRef Links="GA-404"/></ComObjectInstanceRefs>
        </DeviceInstance>"#,
    );
    let index = project.group_address_index();

    assert!(matches!(
        resolve_vendor(project.devices[0].clone(), &index),
        Err(DeviceError::Project(_))
    ));
}
