//! Manifest resolution and caching for pluggable data-source drivers.
//! This crate is the single source of truth for extension validation rules.

pub mod logging;
pub mod manifest;
pub mod registry;

pub use logging::{default_log_level, init_logging, logging_status};
pub use manifest::data_set::{
    supported_common_type_names, CommonType, DataSetType, TYPE_CODE_NULL,
};
pub use manifest::elements::ManifestError;
pub use manifest::explorer::{ExplorerError, ManifestExplorer, DEFAULT_EXTENSION_POINT};
pub use manifest::filter::ManifestFilter;
pub use manifest::model::Manifest;
pub use registry::element::{ConfigElement, ExtensionRecord};
pub use registry::provider::{ExtensionProvider, InMemoryRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
