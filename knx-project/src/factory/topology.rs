//! Construction of topology items from ETS `Topology` elements

use std::sync::Arc;

use tracing::{debug, info};
use xmltree::Element;

use crate::error::{ProjectError, Result};
use crate::finder::{numeric_attribute, optional_attribute, required_attribute, NamespacedFinder};
use crate::model::{Area, Device, Line, DEFAULT_DEVICE_ADDRESS};

use super::strip_project_prefix;

/// Creates areas, lines and devices from ETS topology elements
#[derive(Debug, Clone)]
pub struct TopologyFactory {
    finder: NamespacedFinder,
    prefix: String,
}

impl TopologyFactory {
    pub fn new(finder: NamespacedFinder, project_prefix: &str) -> Self {
        Self {
            finder,
            prefix: format!("{}_", project_prefix),
        }
    }

    fn find_id(&self, element: &Element) -> Result<String> {
        let id = required_attribute(element, "Id")?;
        Ok(strip_project_prefix(id, &self.prefix).to_string())
    }

    /// Create an area from an `Area` element
    pub fn area(&self, element: &Element) -> Result<Area> {
        let area = Area {
            id: self.find_id(element)?,
            name: required_attribute(element, "Name")?.to_string(),
            address: numeric_attribute(element, "Address")?,
        };
        debug!("Area {}: {}", area.address, area.name);
        Ok(area)
    }

    /// Create a line of `area` from a `Line` element
    pub fn line(&self, element: &Element, area: Arc<Area>) -> Result<Line> {
        let line = Line {
            id: self.find_id(element)?,
            name: required_attribute(element, "Name")?.to_string(),
            address: numeric_attribute(element, "Address")?,
            area,
            medium: required_attribute(element, "MediumTypeRefId")?.to_string(),
        };
        debug!("Line {}.{}: {}", line.area.address, line.address, line.name);
        Ok(line)
    }

    /// Create a device on `line` from a `DeviceInstance` element.
    ///
    /// Devices without an `Address` attribute get [`DEFAULT_DEVICE_ADDRESS`].
    pub fn device(&self, element: &Element, line: Arc<Line>) -> Result<Device> {
        let (group_address_ids, texts) = self.find_connections_and_texts(element)?;

        let address = match optional_attribute(element, "Address") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ProjectError::invalid_attribute("Address", raw))?,
            None => DEFAULT_DEVICE_ADDRESS,
        };

        let device = Device {
            id: self.find_id(element)?,
            name: required_attribute(element, "Name")?.to_string(),
            address,
            line,
            product_id: required_attribute(element, "ProductRefId")?.to_string(),
            group_address_ids,
            texts,
        };
        debug!("Device {}: {}", device.individual_address(), device.name);
        Ok(device)
    }

    /// Collect linked group address ids and texts of a device's communication
    /// object references, in document order.
    ///
    /// A device without `ComObjectInstanceRefs` yields two empty lists.
    pub fn find_connections_and_texts(
        &self,
        element: &Element,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let mut group_address_ids = Vec::new();
        let mut texts = Vec::new();

        let containers = self.finder.find_all(element, "ComObjectInstanceRefs");
        let Some(container) = containers.first() else {
            info!(
                "{} has no references.",
                optional_attribute(element, "Name").unwrap_or(&element.name)
            );
            return Ok((group_address_ids, texts));
        };

        for reference in self.finder.find_all(container, "ComObjectInstanceRef") {
            if let Some(links) = optional_attribute(reference, "Links") {
                group_address_ids.extend(links.split_whitespace().map(str::to_string));
            }
            if let Some(text) = optional_attribute(reference, "Text").filter(|t| !t.is_empty()) {
                texts.push(text.to_string());
            }
        }

        Ok((group_address_ids, texts))
    }
}
