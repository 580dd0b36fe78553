//! Read-only extension declaration records.
//!
//! # Responsibility
//! - Model the named, attributed declarations a host registry hands out.
//! - Keep record access borrow-only; the explorer never mutates host data.
//!
//! # Invariants
//! - Element-name matching is ASCII case-insensitive.
//! - Attribute-name matching is exact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named, attributed declaration nested in an extension record.
///
/// Attribute values are kept verbatim as declared; validation of required
/// attributes happens in the manifest layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigElement {
    /// Declared element name, e.g. `data_source` or `data_set`.
    pub name: String,
    /// Declared attributes by exact attribute name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Nested child elements in declaration order.
    #[serde(default)]
    pub children: Vec<ConfigElement>,
}

impl ConfigElement {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Adds one attribute, replacing any previous value for the same name.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends one nested child element.
    pub fn with_child(mut self, child: ConfigElement) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the declared value of one attribute, or `None` when absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns nested children matching `name`, ignoring ASCII case,
    /// in declaration order.
    pub fn children_named(&self, name: &str) -> Vec<&ConfigElement> {
        self.children
            .iter()
            .filter(|child| child.name.eq_ignore_ascii_case(name))
            .collect()
    }
}

/// One contribution under an extension point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Identifier of the contributing plugin, used only for diagnostics.
    #[serde(default)]
    pub contributor: String,
    /// Top-level configuration elements in declaration order.
    #[serde(default)]
    pub elements: Vec<ConfigElement>,
}

impl ExtensionRecord {
    /// Creates an empty record with no contributor label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record attributed to `contributor`.
    pub fn from_contributor(contributor: impl Into<String>) -> Self {
        Self {
            contributor: contributor.into(),
            elements: Vec::new(),
        }
    }

    /// Appends one top-level element.
    pub fn with_element(mut self, element: ConfigElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Returns top-level elements matching `name`, ignoring ASCII case,
    /// in declaration order.
    pub fn sub_elements(&self, name: &str) -> Vec<&ConfigElement> {
        self.elements
            .iter()
            .filter(|element| element.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the contributor label, or a stable placeholder when unset.
    pub fn contributor_label(&self) -> &str {
        if self.contributor.trim().is_empty() {
            "unknown"
        } else {
            self.contributor.as_str()
        }
    }
}
