//! Host registry capability boundary and in-memory implementation.

use crate::registry::element::ExtensionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Narrow capability onto a host extension registry.
///
/// # Contract
/// - Returns every extension contributed under `extension_point_id`, in the
///   order the registry reports them.
/// - Must return an empty list when the registry is unavailable or the
///   extension point is unknown; never fails.
pub trait ExtensionProvider: Send + Sync {
    fn extensions(&self, extension_point_id: &str) -> Vec<ExtensionRecord>;
}

/// In-memory extension registry keyed by extension-point id.
///
/// Used by embedding hosts that assemble declarations programmatically or
/// from serialized form, and by the test suite as the provider fake.
/// Contribution order per extension point is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    #[serde(default)]
    points: BTreeMap<String, Vec<ExtensionRecord>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one extension under `extension_point_id`.
    pub fn register(&mut self, extension_point_id: impl Into<String>, record: ExtensionRecord) {
        self.points
            .entry(extension_point_id.into())
            .or_default()
            .push(record);
    }

    /// Returns the number of registered extensions across all points.
    pub fn len(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.values().all(Vec::is_empty)
    }

    /// Returns sorted extension-point ids with at least one contribution.
    pub fn extension_point_ids(&self) -> Vec<String> {
        self.points
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl ExtensionProvider for InMemoryRegistry {
    fn extensions(&self, extension_point_id: &str) -> Vec<ExtensionRecord> {
        self.points
            .get(extension_point_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtensionProvider, InMemoryRegistry};
    use crate::registry::element::{ConfigElement, ExtensionRecord};

    fn record(id: &str) -> ExtensionRecord {
        ExtensionRecord::new()
            .with_element(ConfigElement::new("data_source").with_attribute("id", id))
    }

    #[test]
    fn unknown_extension_point_yields_empty_list() {
        let registry = InMemoryRegistry::new();
        assert!(registry.extensions("driverkit.data_source").is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn preserves_contribution_order_per_point() {
        let mut registry = InMemoryRegistry::new();
        registry.register("driverkit.data_source", record("first"));
        registry.register("driverkit.data_source", record("second"));
        registry.register("driverkit.data_source", record("third"));

        let extensions = registry.extensions("driverkit.data_source");
        assert_eq!(extensions.len(), 3);
        let ids: Vec<_> = extensions
            .iter()
            .map(|extension| extension.sub_elements("data_source")[0].attribute("id"))
            .collect();
        assert_eq!(ids, vec![Some("first"), Some("second"), Some("third")]);
    }

    #[test]
    fn tracks_points_and_totals() {
        let mut registry = InMemoryRegistry::new();
        registry.register("driverkit.data_source", record("a"));
        registry.register("other.point", record("b"));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.extension_point_ids(),
            vec!["driverkit.data_source".to_string(), "other.point".to_string()]
        );
    }

    #[test]
    fn registry_round_trips_through_serde() {
        let mut registry = InMemoryRegistry::new();
        registry.register("driverkit.data_source", record("acme.flatfile"));

        let json = serde_json::to_string(&registry).expect("registry serialization");
        let decoded: InMemoryRegistry =
            serde_json::from_str(&json).expect("registry deserialization");
        assert_eq!(decoded.extensions("driverkit.data_source").len(), 1);
    }
}
