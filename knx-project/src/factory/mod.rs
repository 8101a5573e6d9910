//! Factories turning project XML elements into model types
//!
//! - [`group_address`]: ETS group address elements and GPA datapoint documents
//! - [`topology`]: ETS areas, lines and device instances

pub mod group_address;
pub mod topology;

pub use group_address::{normalize_gpa_dtype, DatapointFactory, GroupAddressFactory};
pub use topology::TopologyFactory;

/// Remove the `"<projectPrefix>_"` marker from the front of an archive id
pub(crate) fn strip_project_prefix<'a>(id: &'a str, prefix: &str) -> &'a str {
    id.strip_prefix(prefix).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_project_prefix() {
        assert_eq!(strip_project_prefix("P-01-0_GA-1", "P-01-0_"), "GA-1");
        assert_eq!(strip_project_prefix("GA-1", "P-01-0_"), "GA-1");
        assert_eq!(strip_project_prefix("X_P-01-0_GA-1", "P-01-0_"), "X_P-01-0_GA-1");
    }
}
