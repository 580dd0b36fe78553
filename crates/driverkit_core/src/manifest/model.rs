//! Validated manifest of one data-source extension.

use crate::manifest::data_set::DataSetType;
use crate::manifest::elements::{
    data_set_elements, named_element, resolve_display_name, ManifestError,
};
use crate::manifest::{DATA_SOURCE_ELEMENT, DEPRECATED_ATTRIBUTE, ID_ATTRIBUTE};
use crate::registry::element::ExtensionRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured, validated view of one data-source extension declaration.
///
/// Built once per cache epoch from the extension's configuration elements and
/// shared by reference thereafter; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    data_source_id: String,
    display_name: String,
    deprecated: bool,
    data_set_types: BTreeMap<String, DataSetType>,
}

impl Manifest {
    /// Validates an extension record and builds its manifest.
    ///
    /// # Errors
    /// - `MissingElement` when no `data_source` element is declared.
    /// - `MissingAttribute` when a required attribute is absent or blank.
    /// - `NoValidDataSetTypes` when data sets were declared but all invalid.
    pub fn from_extension(extension: &ExtensionRecord) -> Result<Self, ManifestError> {
        let data_source = named_element(extension, DATA_SOURCE_ELEMENT)?;
        let data_source_id = data_source
            .attribute(ID_ATTRIBUTE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ManifestError::MissingAttribute {
                attribute: ID_ATTRIBUTE.to_string(),
                element: DATA_SOURCE_ELEMENT.to_string(),
            })?
            .to_string();

        let display_name = resolve_display_name(data_source);
        let deprecated = data_source
            .attribute(DEPRECATED_ATTRIBUTE)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let data_set_types = data_set_elements(extension, &data_source_id)?;

        Ok(Self {
            data_source_id,
            display_name,
            deprecated,
            data_set_types,
        })
    }

    /// Declared data-source identifier, with its declared casing.
    pub fn data_source_id(&self) -> &str {
        &self.data_source_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Returns one data-set type by exact id, tolerating surrounding
    /// whitespace in the lookup value.
    pub fn data_set_type(&self, data_set_type_id: &str) -> Option<&DataSetType> {
        self.data_set_types.get(data_set_type_id.trim())
    }

    /// Returns all data-set types, ordered by id.
    pub fn data_set_types(&self) -> impl Iterator<Item = &DataSetType> {
        self.data_set_types.values()
    }

    pub fn data_set_type_count(&self) -> usize {
        self.data_set_types.len()
    }
}
