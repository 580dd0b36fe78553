use driverkit_core::{
    ConfigElement, ExplorerError, ExtensionProvider, ExtensionRecord, InMemoryRegistry,
    ManifestExplorer, DEFAULT_EXTENSION_POINT,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Provider double that counts registry scans.
struct CountingProvider {
    inner: InMemoryRegistry,
    scans: AtomicUsize,
}

impl CountingProvider {
    fn with_extensions(extensions: Vec<ExtensionRecord>) -> Self {
        let mut inner = InMemoryRegistry::new();
        for record in extensions {
            inner.register(DEFAULT_EXTENSION_POINT, record);
        }
        Self {
            inner,
            scans: AtomicUsize::new(0),
        }
    }

    fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl ExtensionProvider for CountingProvider {
    fn extensions(&self, extension_point_id: &str) -> Vec<ExtensionRecord> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.inner.extensions(extension_point_id)
    }
}

fn flatfile_extension(id: &str) -> ExtensionRecord {
    ExtensionRecord::from_contributor("acme.drivers")
        .with_element(ConfigElement::new("data_source").with_attribute("id", id))
        .with_element(
            ConfigElement::new("data_set")
                .with_attribute("id", format!("{id}.rows"))
                .with_child(
                    ConfigElement::new("type_mapping")
                        .with_attribute("native_code", "1")
                        .with_attribute("common_type", "string"),
                ),
        )
}

#[test]
fn repeated_resolution_returns_identical_cached_instance_without_rescan() {
    let provider = Arc::new(CountingProvider::with_extensions(vec![flatfile_extension(
        "acme.flatfile",
    )]));
    let explorer = ManifestExplorer::new(Arc::clone(&provider) as Arc<dyn ExtensionProvider>);

    let first = explorer.manifest("acme.flatfile").expect("first resolution");
    let scans_after_first = provider.scan_count();
    assert!(scans_after_first >= 1);

    let second = explorer.manifest("acme.flatfile").expect("second resolution");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(provider.scan_count(), scans_after_first);
}

#[test]
fn refresh_forces_a_fresh_scan_and_a_distinct_instance() {
    let provider = Arc::new(CountingProvider::with_extensions(vec![flatfile_extension(
        "acme.flatfile",
    )]));
    let explorer = ManifestExplorer::new(Arc::clone(&provider) as Arc<dyn ExtensionProvider>);

    let before = explorer.manifest("acme.flatfile").expect("resolution before refresh");
    let scans_before = provider.scan_count();

    explorer.refresh();

    let after = explorer.manifest("acme.flatfile").expect("resolution after refresh");
    assert!(provider.scan_count() > scans_before);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.data_source_id(), after.data_source_id());
}

#[test]
fn blank_arguments_never_reach_the_registry() {
    let provider = Arc::new(CountingProvider::with_extensions(vec![flatfile_extension(
        "acme.flatfile",
    )]));
    let explorer = ManifestExplorer::new(Arc::clone(&provider) as Arc<dyn ExtensionProvider>);

    assert_eq!(
        explorer.manifest("").expect_err("blank id fails"),
        ExplorerError::EmptyDataSourceId
    );
    assert_eq!(
        explorer
            .manifest_in("", DEFAULT_EXTENSION_POINT)
            .expect_err("blank id fails"),
        ExplorerError::EmptyDataSourceId
    );
    assert_eq!(
        explorer
            .manifest_in("acme.flatfile", "")
            .expect_err("blank extension point fails"),
        ExplorerError::EmptyExtensionPointId
    );
    assert_eq!(provider.scan_count(), 0);
}

#[test]
fn bulk_resolution_populates_the_cache_for_single_lookups() {
    let provider = Arc::new(CountingProvider::with_extensions(vec![
        flatfile_extension("acme.flatfile"),
        flatfile_extension("acme.spreadsheet"),
    ]));
    let explorer = ManifestExplorer::new(Arc::clone(&provider) as Arc<dyn ExtensionProvider>);

    let manifests = explorer.manifests();
    assert_eq!(manifests.len(), 2);
    let scans_after_bulk = provider.scan_count();

    let single = explorer.manifest("acme.spreadsheet").expect("cached lookup");
    assert!(Arc::ptr_eq(&manifests[1], &single));
    assert_eq!(provider.scan_count(), scans_after_bulk);
}
