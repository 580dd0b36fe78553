//! Manifest resolution for data-source driver extensions.
//!
//! # Responsibility
//! - Validate host extension declarations and build structured manifests.
//! - Cache manifests by declared data-source id until an explicit refresh.
//!
//! # Invariants
//! - At most one manifest is constructed per data-source id per cache epoch.
//! - A malformed extension never yields a manifest; bulk scans skip it,
//!   single-target lookups surface the failure.

pub mod data_set;
pub mod elements;
pub mod explorer;
pub mod filter;
pub mod model;

/// Element name of the single declaring element of a data-source extension.
pub const DATA_SOURCE_ELEMENT: &str = "data_source";
/// Element name of a nested data-set type declaration.
pub const DATA_SET_ELEMENT: &str = "data_set";
/// Element name of a native-to-common type mapping inside a data-set element.
pub const TYPE_MAPPING_ELEMENT: &str = "type_mapping";

/// Required identifying attribute on declaring elements.
pub const ID_ATTRIBUTE: &str = "id";
/// Optional short-name attribute, second choice for display names.
pub const NAME_ATTRIBUTE: &str = "name";
/// Optional explicit display-name attribute, first choice for display names.
pub const DISPLAY_NAME_ATTRIBUTE: &str = "display_name";
/// Optional deprecation marker attribute on the data-source element.
pub const DEPRECATED_ATTRIBUTE: &str = "deprecated";
/// Required native type-code attribute on a type-mapping element.
pub const NATIVE_CODE_ATTRIBUTE: &str = "native_code";
/// Required common-type attribute on a type-mapping element.
pub const COMMON_TYPE_ATTRIBUTE: &str = "common_type";
