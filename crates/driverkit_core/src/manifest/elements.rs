//! Declaration-element helper contracts and validation errors.
//!
//! These helpers implement the shared validation rules for locating declaring
//! elements inside an extension record. They are used by the manifest builders
//! and exposed for collaborators that inspect extensions directly.

use crate::manifest::data_set::DataSetType;
use crate::manifest::{
    DATA_SET_ELEMENT, DISPLAY_NAME_ATTRIBUTE, ID_ATTRIBUTE, NAME_ATTRIBUTE,
};
use crate::registry::element::{ConfigElement, ExtensionRecord};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors raised while interpreting an extension declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The extension declares no element with the expected name.
    MissingElement(String),
    /// A declared element lacks a required attribute or declares it empty.
    MissingAttribute { attribute: String, element: String },
    /// Data-set elements were declared, but none of them is valid.
    NoValidDataSetTypes(String),
    /// A type-mapping native code is not a valid integer.
    InvalidNativeCode { data_set_id: String, value: String },
    /// A type-mapping names a common type outside the supported set.
    UnsupportedCommonType { data_set_id: String, value: String },
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(element) => {
                write!(f, "no {element} element found in extension")
            }
            Self::MissingAttribute { attribute, element } => write!(
                f,
                "required attribute {attribute} is missing or empty on {element} element"
            ),
            Self::NoValidDataSetTypes(data_source_id) => write!(
                f,
                "no valid data_set declarations in data source extension: {data_source_id}"
            ),
            Self::InvalidNativeCode { data_set_id, value } => write!(
                f,
                "native_code is not an integer in data_set {data_set_id}: {value}"
            ),
            Self::UnsupportedCommonType { data_set_id, value } => write!(
                f,
                "common_type is unsupported in data_set {data_set_id}: {value}"
            ),
        }
    }
}

impl Error for ManifestError {}

/// Returns the single declaring element with the given name.
///
/// # Contract
/// - Zero matching elements is a `MissingElement` error.
/// - More than one matching element: the first declared one is used silently.
/// - Every matching element must carry a non-empty `id` attribute.
pub fn named_element<'a>(
    extension: &'a ExtensionRecord,
    element_name: &str,
) -> Result<&'a ConfigElement, ManifestError> {
    let elements = named_elements(extension, element_name, ID_ATTRIBUTE)?;
    elements
        .first()
        .copied()
        .ok_or_else(|| ManifestError::MissingElement(element_name.to_string()))
}

/// Returns all elements with the given name, validating a required attribute.
///
/// # Contract
/// - Any matching element with the attribute absent or blank fails the whole
///   call with `MissingAttribute`; attribute absence marks a malformed
///   declaration, not a filterable alternative.
pub fn named_elements<'a>(
    extension: &'a ExtensionRecord,
    element_name: &str,
    required_attribute: &str,
) -> Result<Vec<&'a ConfigElement>, ManifestError> {
    let matched = extension.sub_elements(element_name);
    for element in &matched {
        let value = element.attribute(required_attribute).unwrap_or_default();
        if value.trim().is_empty() {
            return Err(ManifestError::MissingAttribute {
                attribute: required_attribute.to_string(),
                element: element_name.to_string(),
            });
        }
    }
    Ok(matched)
}

/// Builds the data-set type map for one data-source extension.
///
/// # Contract
/// - Duplicate data-set ids: the last declared element wins silently.
/// - Individually invalid declarations are skipped with a warning log.
/// - Zero declared elements is legitimate (info log, empty map); one or more
///   declared but none valid is a `NoValidDataSetTypes` error.
pub fn data_set_elements(
    extension: &ExtensionRecord,
    data_source_id: &str,
) -> Result<BTreeMap<String, DataSetType>, ManifestError> {
    let declared = named_elements(extension, DATA_SET_ELEMENT, ID_ATTRIBUTE)?;

    let mut data_set_types = BTreeMap::new();
    for element in declared.iter().copied() {
        let data_set_id = element.attribute(ID_ATTRIBUTE).unwrap_or_default().trim();
        match DataSetType::from_element(element) {
            Ok(data_set_type) => {
                data_set_types.insert(data_set_id.to_string(), data_set_type);
            }
            Err(err) => {
                warn!(
                    "event=data_set_skipped module=manifest status=warn data_source={} data_set={} reason={}",
                    data_source_id, data_set_id, err
                );
            }
        }
    }

    if data_set_types.is_empty() {
        if !declared.is_empty() {
            return Err(ManifestError::NoValidDataSetTypes(
                data_source_id.to_string(),
            ));
        }
        info!(
            "event=no_data_set_types module=manifest status=ok data_source={}",
            data_source_id
        );
    }

    Ok(data_set_types)
}

/// Resolves the best-available display name for a declaring element.
///
/// Priority order: `display_name`, then `name`, then `id`; the first present,
/// non-blank value wins. Returns an empty string when none is declared.
pub fn resolve_display_name(element: &ConfigElement) -> String {
    [DISPLAY_NAME_ATTRIBUTE, NAME_ATTRIBUTE, ID_ATTRIBUTE]
        .iter()
        .filter_map(|attribute| element.attribute(attribute))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
