use driverkit_core::{
    ConfigElement, ExplorerError, ExtensionRecord, InMemoryRegistry, ManifestExplorer,
    DEFAULT_EXTENSION_POINT,
};
use std::sync::Arc;

fn data_source(id: &str, display_name: &str) -> ExtensionRecord {
    ExtensionRecord::new().with_element(
        ConfigElement::new("data_source")
            .with_attribute("id", id)
            .with_attribute("display_name", display_name),
    )
}

fn explorer_with(extensions: Vec<ExtensionRecord>) -> ManifestExplorer {
    let mut registry = InMemoryRegistry::new();
    for record in extensions {
        registry.register(DEFAULT_EXTENSION_POINT, record);
    }
    ManifestExplorer::new(Arc::new(registry))
}

#[test]
fn identifier_matching_ignores_ascii_case() {
    let explorer = explorer_with(vec![data_source("Acme.FlatFile", "Flat File Driver")]);

    for lookup in ["Acme.FlatFile", "acme.flatfile", "ACME.FLATFILE"] {
        let manifest = explorer.manifest(lookup).expect("case-insensitive match");
        assert_eq!(manifest.data_source_id(), "Acme.FlatFile");
    }
}

#[test]
fn differently_cased_lookups_share_one_cached_instance() {
    let explorer = explorer_with(vec![data_source("Acme.FlatFile", "Flat File Driver")]);

    let lower = explorer.manifest("acme.flatfile").expect("lower-case lookup");
    let upper = explorer.manifest("ACME.FLATFILE").expect("upper-case lookup");
    assert!(Arc::ptr_eq(&lower, &upper));
}

#[test]
fn first_extension_in_registry_order_wins_on_duplicate_ids() {
    let explorer = explorer_with(vec![
        data_source("dup.source", "First"),
        data_source("DUP.SOURCE", "Second"),
    ]);

    let manifest = explorer.manifest("dup.source").expect("duplicate id lookup");
    assert_eq!(manifest.display_name(), "First");
}

#[test]
fn not_found_contract_is_asymmetric_between_forms() {
    let explorer = explorer_with(vec![data_source("acme.flatfile", "Flat File Driver")]);

    let err = explorer.manifest("acme.missing").expect_err("convenience form fails hard");
    assert_eq!(
        err,
        ExplorerError::UnknownDataSourceId("acme.missing".to_string())
    );

    let absent = explorer
        .manifest_in("acme.missing", DEFAULT_EXTENSION_POINT)
        .expect("explicit form reports absence softly");
    assert!(absent.is_none());
}

#[test]
fn unknown_extension_point_reports_absence_not_failure() {
    let explorer = explorer_with(vec![data_source("acme.flatfile", "Flat File Driver")]);

    let absent = explorer
        .manifest_in("acme.flatfile", "nonexistent.point")
        .expect("unknown point is tolerated");
    assert!(absent.is_none());
}

#[test]
fn scan_skips_invalid_extensions_and_still_finds_later_match() {
    let invalid = ExtensionRecord::new().with_element(ConfigElement::new("unrelated"));
    let blank_id = ExtensionRecord::new()
        .with_element(ConfigElement::new("data_source").with_attribute("id", "   "));
    let explorer = explorer_with(vec![
        invalid,
        blank_id,
        data_source("acme.flatfile", "Flat File Driver"),
    ]);

    let manifest = explorer.manifest("acme.flatfile").expect("later valid match");
    assert_eq!(manifest.display_name(), "Flat File Driver");
}

#[test]
fn identifier_listing_resolves_display_names_by_priority() {
    let explorer = explorer_with(vec![
        ExtensionRecord::new().with_element(
            ConfigElement::new("data_source")
                .with_attribute("id", "acme.named")
                .with_attribute("name", "named")
                .with_attribute("display_name", "Named Driver"),
        ),
        ExtensionRecord::new()
            .with_element(ConfigElement::new("data_source").with_attribute("id", "acme.plain")),
    ]);

    let identifiers = explorer.data_source_identifiers();
    assert_eq!(identifiers.len(), 2);
    assert_eq!(
        identifiers.get("acme.named").map(String::as_str),
        Some("Named Driver")
    );
    assert_eq!(
        identifiers.get("acme.plain").map(String::as_str),
        Some("acme.plain")
    );
}

#[test]
fn empty_registry_yields_empty_identifier_mapping() {
    let explorer = ManifestExplorer::new(Arc::new(InMemoryRegistry::new()));
    assert!(explorer.data_source_identifiers().is_empty());
    assert!(explorer.manifests().is_empty());
}
