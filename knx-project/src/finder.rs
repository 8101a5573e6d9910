//! Namespace aware element lookup on parsed XML trees
//!
//! All project documents of one archive share a single namespace. The
//! [`NamespacedFinder`] hides that namespace so factories can query elements
//! by their local name only.

use xmltree::{Element, XMLNode};

use crate::error::{ProjectError, Result};
use crate::namespace::Namespace;

/// Finds child elements by local name, qualified with a fixed namespace
#[derive(Debug, Clone, Default)]
pub struct NamespacedFinder {
    namespace: Option<String>,
}

impl NamespacedFinder {
    /// Finder for documents that use the given namespace
    pub fn new(namespace: &Namespace) -> Self {
        Self {
            namespace: Some(namespace.uri.clone()),
        }
    }

    /// Finder for un-namespaced documents
    pub fn unqualified() -> Self {
        Self { namespace: None }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn matches(&self, element: &Element, local_name: &str) -> bool {
        element.name == local_name && element.namespace.as_deref() == self.namespace.as_deref()
    }

    /// All direct children of `element` with the given local name, in document order
    pub fn find_all<'a>(&self, element: &'a Element, local_name: &str) -> Vec<&'a Element> {
        element
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .filter(|child| self.matches(child, local_name))
            .collect()
    }

    /// The single direct child with the given local name.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` unless exactly one child matches.
    pub fn find_one<'a>(&self, element: &'a Element, local_name: &str) -> Result<&'a Element> {
        let mut found = self.find_all(element, local_name);
        match found.len() {
            1 => Ok(found.remove(0)),
            count => Err(ProjectError::NotFound {
                keyword: local_name.to_string(),
                count,
            }),
        }
    }

    /// Zero or one direct child with the given local name
    pub fn find_optional<'a>(
        &self,
        element: &'a Element,
        local_name: &str,
    ) -> Result<Option<&'a Element>> {
        let mut found = self.find_all(element, local_name);
        match found.len() {
            0 => Ok(None),
            1 => Ok(Some(found.remove(0))),
            count => Err(ProjectError::NotFound {
                keyword: local_name.to_string(),
                count,
            }),
        }
    }

    /// The single element with the given local name anywhere below `root`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` unless exactly one descendant matches.
    pub fn find_unique_descendant<'a>(
        &self,
        root: &'a Element,
        local_name: &str,
    ) -> Result<&'a Element> {
        let mut found = Vec::new();
        let mut pending = vec![root];

        while let Some(element) = pending.pop() {
            for child in element.children.iter().filter_map(XMLNode::as_element) {
                if self.matches(child, local_name) {
                    found.push(child);
                }
                pending.push(child);
            }
        }

        match found.len() {
            1 => Ok(found.remove(0)),
            count => Err(ProjectError::NotFound {
                keyword: local_name.to_string(),
                count,
            }),
        }
    }

    /// Text content of the single child with the given local name
    pub fn child_text(&self, element: &Element, local_name: &str) -> Result<String> {
        self.find_one(element, local_name)?
            .get_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ProjectError::MissingText(local_name.to_string()))
    }

    /// Text content of an optional child, `None` if the child is absent or empty
    pub fn optional_child_text(&self, element: &Element, local_name: &str) -> Result<Option<String>> {
        Ok(self
            .find_optional(element, local_name)?
            .and_then(|child| child.get_text())
            .map(|text| text.trim().to_string()))
    }
}

/// Value of a required attribute
pub fn required_attribute<'a>(element: &'a Element, attribute: &str) -> Result<&'a str> {
    element
        .attributes
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| ProjectError::missing_attribute(&element.name, attribute))
}

/// Value of an optional attribute
pub fn optional_attribute<'a>(element: &'a Element, attribute: &str) -> Option<&'a str> {
    element.attributes.get(attribute).map(String::as_str)
}

/// Parse a required attribute as an unsigned 16-bit integer
pub fn numeric_attribute(element: &Element, attribute: &str) -> Result<u16> {
    let raw = required_attribute(element, attribute)?;
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ProjectError::invalid_attribute(attribute, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceResolver;
    use rstest::rstest;

    fn build_document(namespace: Option<&str>, keyword: &str, count: usize) -> Element {
        let xmlns = namespace
            .map(|uri| format!(r#" xmlns="{}""#, uri))
            .unwrap_or_default();
        let children: String = (0..count)
            .map(|_| format!(r#"<{} Bar="Baz"/>"#, keyword))
            .collect();
        let xml = format!("<KNX{}>{}<Other Bar=\"Qux\"/></KNX>", xmlns, children);
        Element::parse(xml.as_bytes()).unwrap()
    }

    fn finder_for(key: Option<&str>) -> NamespacedFinder {
        match key {
            Some(key) => NamespacedFinder::new(&NamespaceResolver::default().resolve_key(key).unwrap()),
            None => NamespacedFinder::unqualified(),
        }
    }

    #[rstest]
    fn test_find_all_with_namespace_variation(
        #[values(None, Some("ets56"), Some("ets57"))] key: Option<&str>,
        #[values(0, 1, 10)] expected_count: usize,
    ) {
        let finder = finder_for(key);
        let root = build_document(finder.namespace(), "Foo", expected_count);

        let result = finder.find_all(&root, "Foo");
        assert_eq!(result.len(), expected_count);
        for element in result {
            assert_eq!(element.attributes.len(), 1);
            assert_eq!(element.attributes.get("Bar").map(String::as_str), Some("Baz"));
        }
    }

    #[test]
    fn test_unqualified_finder_ignores_namespaced_children() {
        let root = build_document(Some("http://knx.org/xml/project/20"), "Foo", 3);
        assert!(NamespacedFinder::unqualified().find_all(&root, "Foo").is_empty());
    }

    #[test]
    fn test_find_one_requires_exactly_one() {
        let finder = NamespacedFinder::unqualified();

        let root = build_document(None, "Foo", 1);
        assert!(finder.find_one(&root, "Foo").is_ok());

        let root = build_document(None, "Foo", 2);
        match finder.find_one(&root, "Foo") {
            Err(ProjectError::NotFound { keyword, count }) => {
                assert_eq!(keyword, "Foo");
                assert_eq!(count, 2);
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }

        let root = build_document(None, "Foo", 0);
        assert!(matches!(
            finder.find_one(&root, "Foo"),
            Err(ProjectError::NotFound { count: 0, .. })
        ));
    }

    #[test]
    fn test_find_optional() {
        let finder = NamespacedFinder::unqualified();
        assert!(finder.find_optional(&build_document(None, "Foo", 0), "Foo").unwrap().is_none());
        assert!(finder.find_optional(&build_document(None, "Foo", 1), "Foo").unwrap().is_some());
        assert!(finder.find_optional(&build_document(None, "Foo", 2), "Foo").is_err());
    }

    #[test]
    fn test_find_unique_descendant() {
        let xml = r#"<KNX><Project><Installations><Installation><Topology Id="t"/></Installation></Installations></Project></KNX>"#;
        let root = Element::parse(xml.as_bytes()).unwrap();
        let finder = NamespacedFinder::unqualified();

        let topology = finder.find_unique_descendant(&root, "Topology").unwrap();
        assert_eq!(topology.attributes.get("Id").map(String::as_str), Some("t"));

        assert!(matches!(
            finder.find_unique_descendant(&root, "GroupAddresses"),
            Err(ProjectError::NotFound { count: 0, .. })
        ));
    }

    #[test]
    fn test_find_unique_descendant_rejects_duplicates() {
        let xml = r#"<KNX><A><Topology/></A><B><Topology/></B></KNX>"#;
        let root = Element::parse(xml.as_bytes()).unwrap();
        assert!(matches!(
            NamespacedFinder::unqualified().find_unique_descendant(&root, "Topology"),
            Err(ProjectError::NotFound { count: 2, .. })
        ));
    }

    #[test]
    fn test_attribute_helpers() {
        let root = Element::parse(r#"<GroupAddress Address="2305" Name="x" Bad="abc"/>"#.as_bytes()).unwrap();
        assert_eq!(numeric_attribute(&root, "Address").unwrap(), 2305);
        assert_eq!(required_attribute(&root, "Name").unwrap(), "x");
        assert!(optional_attribute(&root, "Missing").is_none());
        assert!(matches!(
            numeric_attribute(&root, "Bad"),
            Err(ProjectError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            required_attribute(&root, "Missing"),
            Err(ProjectError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_child_text() {
        let root = Element::parse(r#"<KnxDataPoint><EntityName> Light </EntityName><Empty/></KnxDataPoint>"#.as_bytes()).unwrap();
        let finder = NamespacedFinder::unqualified();
        assert_eq!(finder.child_text(&root, "EntityName").unwrap(), "Light");
        assert!(matches!(
            finder.child_text(&root, "Empty"),
            Err(ProjectError::MissingText(_))
        ));
        assert_eq!(finder.optional_child_text(&root, "Absent").unwrap(), None);
    }
}
