//! Manifest explorer: cached resolution over a host extension registry.
//!
//! # Responsibility
//! - Resolve data-source extension declarations into cached manifests.
//! - Keep bulk queries best-effort: one bad extension never aborts discovery.
//!
//! # Invariants
//! - Cache keys are declared ids (case-sensitive); the miss-path scan matches
//!   candidate ids case-insensitively and re-checks the cache under the
//!   declared casing before construction.
//! - `refresh()` replaces cache contents wholesale; cached manifests are
//!   never mutated in place.

use crate::manifest::data_set::TYPE_CODE_NULL;
use crate::manifest::elements::{named_element, resolve_display_name, ManifestError};
use crate::manifest::filter::ManifestFilter;
use crate::manifest::model::Manifest;
use crate::manifest::{DATA_SOURCE_ELEMENT, ID_ATTRIBUTE};
use crate::registry::element::ExtensionRecord;
use crate::registry::provider::ExtensionProvider;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Well-known extension point under which data-source drivers register.
pub const DEFAULT_EXTENSION_POINT: &str = "driverkit.data_source";

/// Errors surfaced by explorer lookup operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    EmptyDataSourceId,
    EmptyExtensionPointId,
    UnknownDataSourceId(String),
    InvalidManifest(ManifestError),
}

impl Display for ExplorerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataSourceId => write!(f, "data source id must not be empty"),
            Self::EmptyExtensionPointId => write!(f, "extension point id must not be empty"),
            Self::UnknownDataSourceId(id) => write!(f, "no data source extension found: {id}"),
            Self::InvalidManifest(err) => write!(f, "invalid extension manifest: {err}"),
        }
    }
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidManifest(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ManifestError> for ExplorerError {
    fn from(value: ManifestError) -> Self {
        Self::InvalidManifest(value)
    }
}

type ManifestCache = BTreeMap<String, Arc<Manifest>>;

/// Cached manifest resolution over one host registry provider.
///
/// One explorer instance carries one logical cache per host session; callers
/// share it by `Arc`. `refresh()` clears the cache while keeping the explorer
/// identity, and dropping the last handle releases everything.
pub struct ManifestExplorer {
    provider: Arc<dyn ExtensionProvider>,
    cache: RwLock<ManifestCache>,
}

impl ManifestExplorer {
    /// Creates an explorer over the given host registry provider.
    pub fn new(provider: Arc<dyn ExtensionProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(ManifestCache::new()),
        }
    }

    /// Clears the manifest cache, forcing subsequent lookups to rebuild from
    /// the host registry.
    pub fn refresh(&self) {
        self.cache_write().clear();
        debug!("event=cache_refreshed module=manifest status=ok");
    }

    /// Returns the id -> display-name mapping of all data-source extensions
    /// under the default extension point.
    ///
    /// Never fails: invalid extensions are skipped with a warning log, and an
    /// empty registry yields an empty mapping.
    pub fn data_source_identifiers(&self) -> BTreeMap<String, String> {
        let mut identifiers = BTreeMap::new();
        for extension in self.provider.extensions(DEFAULT_EXTENSION_POINT) {
            match declared_identity(&extension) {
                Ok((id, display_name)) => {
                    identifiers.insert(id, display_name);
                }
                Err(err) => {
                    warn!(
                        "event=extension_skipped module=manifest status=warn contributor={} reason={}",
                        extension.contributor_label(),
                        err
                    );
                }
            }
        }
        identifiers
    }

    /// Resolves the manifest for one data-source id under the default
    /// extension point.
    ///
    /// # Errors
    /// - `EmptyDataSourceId` for a blank id, without a registry scan.
    /// - `UnknownDataSourceId` when no extension matches; the id is assumed
    ///   to exist under this convenience form.
    /// - `InvalidManifest` when the matched extension is malformed.
    pub fn manifest(&self, data_source_id: &str) -> Result<Arc<Manifest>, ExplorerError> {
        match self.manifest_in(data_source_id, DEFAULT_EXTENSION_POINT)? {
            Some(manifest) => Ok(manifest),
            None => Err(ExplorerError::UnknownDataSourceId(
                data_source_id.trim().to_string(),
            )),
        }
    }

    /// Resolves the manifest for one data-source id under an explicit
    /// extension point.
    ///
    /// Returns `Ok(None)` when no extension matches; unlike the single-arg
    /// convenience form, an absent match is not a failure here.
    ///
    /// The cache lookup is case-sensitive on the stored declared id; the
    /// miss-path scan compares candidate ids case-insensitively and the first
    /// extension in registry order wins.
    ///
    /// # Errors
    /// - `EmptyDataSourceId` / `EmptyExtensionPointId` for blank arguments,
    ///   without a registry scan.
    /// - `InvalidManifest` when the matched extension is malformed.
    pub fn manifest_in(
        &self,
        data_source_id: &str,
        extension_point_id: &str,
    ) -> Result<Option<Arc<Manifest>>, ExplorerError> {
        let data_source_id = data_source_id.trim();
        if data_source_id.is_empty() {
            return Err(ExplorerError::EmptyDataSourceId);
        }
        let extension_point_id = extension_point_id.trim();
        if extension_point_id.is_empty() {
            return Err(ExplorerError::EmptyExtensionPointId);
        }

        if let Some(cached) = self.cache_read().get(data_source_id).cloned() {
            return Ok(Some(cached));
        }

        let extensions = self.provider.extensions(extension_point_id);
        match find_extension(data_source_id, &extensions) {
            Some(extension) => Ok(Some(self.build_or_cached(extension)?)),
            None => Ok(None),
        }
    }

    /// Returns all manifests under the default extension point with the
    /// legacy default filter: manifests with zero data-set types are
    /// excluded, deprecated manifests are included.
    pub fn manifests(&self) -> Vec<Arc<Manifest>> {
        let mut filter = ManifestFilter::new();
        filter.set_exclude_missing_data_set_types(true);
        self.manifests_in(DEFAULT_EXTENSION_POINT, Some(&filter))
    }

    /// Returns all manifests under one extension point, in registry order,
    /// applying the optional filter.
    ///
    /// Never fails: invalid extensions are skipped with a warning log, and a
    /// blank or unknown extension point yields an empty collection.
    pub fn manifests_in(
        &self,
        extension_point_id: &str,
        filter: Option<&ManifestFilter>,
    ) -> Vec<Arc<Manifest>> {
        let extension_point_id = extension_point_id.trim();
        if extension_point_id.is_empty() {
            return Vec::new();
        }

        let mut manifests = Vec::new();
        for extension in self.provider.extensions(extension_point_id) {
            let manifest = match self.build_or_cached(&extension) {
                Ok(manifest) => manifest,
                Err(err) => {
                    warn!(
                        "event=extension_skipped module=manifest status=warn contributor={} reason={}",
                        extension.contributor_label(),
                        err
                    );
                    continue;
                }
            };
            if filter.is_some_and(|filter| filter.excludes(&manifest)) {
                continue;
            }
            manifests.push(manifest);
        }
        manifests
    }

    /// Returns all manifests under the default extension point.
    ///
    /// `includes_all == true` keeps manifests with zero data-set types;
    /// `false` excludes them. Deprecated manifests are always included.
    #[deprecated(note = "use manifests_in with an explicit ManifestFilter")]
    pub fn manifests_including_all(&self, includes_all: bool) -> Vec<Arc<Manifest>> {
        let mut filter = ManifestFilter::new();
        filter.set_exclude_missing_data_set_types(!includes_all);
        self.manifests_in(DEFAULT_EXTENSION_POINT, Some(&filter))
    }

    /// Maps one native type code to its common type code through the named
    /// data-source and data-set type.
    ///
    /// Never fails: any resolution miss degrades to `TYPE_CODE_NULL`.
    pub fn default_type_code(
        &self,
        native_code: i32,
        data_source_id: &str,
        data_set_type_id: &str,
    ) -> i32 {
        let manifest = match self.manifest(data_source_id) {
            Ok(manifest) => manifest,
            Err(_) => return TYPE_CODE_NULL,
        };
        match manifest.data_set_type(data_set_type_id) {
            Some(data_set_type) => data_set_type.default_type_code(native_code),
            None => TYPE_CODE_NULL,
        }
    }

    /// Builds the manifest for one extension record, or returns the cached
    /// instance stored under the extension's declared id.
    ///
    /// The first manifest inserted for an id within a cache epoch wins;
    /// later candidates for the same id are discarded in its favor.
    fn build_or_cached(&self, extension: &ExtensionRecord) -> Result<Arc<Manifest>, ManifestError> {
        let declared_id = {
            let data_source = named_element(extension, DATA_SOURCE_ELEMENT)?;
            data_source
                .attribute(ID_ATTRIBUTE)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ManifestError::MissingAttribute {
                    attribute: ID_ATTRIBUTE.to_string(),
                    element: DATA_SOURCE_ELEMENT.to_string(),
                })?
                .to_string()
        };

        if let Some(cached) = self.cache_read().get(&declared_id).cloned() {
            return Ok(cached);
        }

        let built = Arc::new(Manifest::from_extension(extension)?);
        let mut cache = self.cache_write();
        Ok(cache.entry(declared_id).or_insert(built).clone())
    }

    fn cache_read(&self) -> RwLockReadGuard<'_, ManifestCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_write(&self) -> RwLockWriteGuard<'_, ManifestCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the first extension in registry order whose declared data-source
/// id matches, ignoring ASCII case. Extensions that fail id extraction are
/// skipped with a warning log.
fn find_extension<'a>(
    data_source_id: &str,
    extensions: &'a [ExtensionRecord],
) -> Option<&'a ExtensionRecord> {
    for extension in extensions {
        let declared = match named_element(extension, DATA_SOURCE_ELEMENT) {
            Ok(data_source) => data_source.attribute(ID_ATTRIBUTE).unwrap_or_default(),
            Err(err) => {
                warn!(
                    "event=extension_skipped module=manifest status=warn contributor={} reason={}",
                    extension.contributor_label(),
                    err
                );
                continue;
            }
        };
        if declared.trim().eq_ignore_ascii_case(data_source_id) {
            return Some(extension);
        }
    }
    None
}

/// Extracts the declared id and resolved display name of one extension.
fn declared_identity(extension: &ExtensionRecord) -> Result<(String, String), ManifestError> {
    let data_source = named_element(extension, DATA_SOURCE_ELEMENT)?;
    let id = data_source
        .attribute(ID_ATTRIBUTE)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ManifestError::MissingAttribute {
            attribute: ID_ATTRIBUTE.to_string(),
            element: DATA_SOURCE_ELEMENT.to_string(),
        })?
        .to_string();
    let display_name = resolve_display_name(data_source);
    Ok((id, display_name))
}
