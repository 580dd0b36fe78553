//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `driverkit_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use driverkit_core::{
    ConfigElement, ExtensionRecord, InMemoryRegistry, ManifestExplorer, DEFAULT_EXTENSION_POINT,
};
use std::sync::Arc;

fn sample_extension() -> ExtensionRecord {
    ExtensionRecord::from_contributor("driverkit.samples")
        .with_element(
            ConfigElement::new("data_source")
                .with_attribute("id", "sample.flatfile")
                .with_attribute("display_name", "Sample Flat File Driver"),
        )
        .with_element(
            ConfigElement::new("data_set")
                .with_attribute("id", "sample.flatfile.rows")
                .with_child(
                    ConfigElement::new("type_mapping")
                        .with_attribute("native_code", "1")
                        .with_attribute("common_type", "string"),
                ),
        )
}

fn main() {
    println!("driverkit_core version={}", driverkit_core::core_version());

    let mut registry = InMemoryRegistry::new();
    registry.register(DEFAULT_EXTENSION_POINT, sample_extension());
    let explorer = ManifestExplorer::new(Arc::new(registry));

    for (id, display_name) in explorer.data_source_identifiers() {
        println!("data_source id={id} display_name={display_name}");
    }
    println!(
        "type_code native=1 common={}",
        explorer.default_type_code(1, "sample.flatfile", "sample.flatfile.rows")
    );
}
