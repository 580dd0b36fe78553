//! Exclusion toggles for bulk manifest queries.

use crate::manifest::model::Manifest;

/// Filtering options applied when retrieving a manifest collection.
///
/// A filter is a short-lived value created per query; the default excludes
/// nothing. The two toggles are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestFilter {
    exclude_missing_data_set_types: bool,
    exclude_deprecated: bool,
}

impl ManifestFilter {
    /// Creates a filter that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies whether to exclude manifests with zero data-set types.
    pub fn set_exclude_missing_data_set_types(&mut self, exclude: bool) {
        self.exclude_missing_data_set_types = exclude;
    }

    /// Specifies whether to exclude deprecated manifests.
    pub fn set_exclude_deprecated(&mut self, exclude: bool) {
        self.exclude_deprecated = exclude;
    }

    pub fn excludes_missing_data_set_types(&self) -> bool {
        self.exclude_missing_data_set_types
    }

    pub fn excludes_deprecated(&self) -> bool {
        self.exclude_deprecated
    }

    /// Returns whether this filter drops the given manifest.
    pub fn excludes(&self, manifest: &Manifest) -> bool {
        if self.exclude_missing_data_set_types && manifest.data_set_type_count() == 0 {
            return true;
        }
        if self.exclude_deprecated && manifest.is_deprecated() {
            return true;
        }
        false
    }
}
