//! Data-set type declarations and native-to-common type-code mapping.

use crate::manifest::elements::{resolve_display_name, ManifestError};
use crate::manifest::{
    COMMON_TYPE_ATTRIBUTE, ID_ATTRIBUTE, NATIVE_CODE_ATTRIBUTE, TYPE_MAPPING_ELEMENT,
};
use crate::registry::element::ConfigElement;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distinguished "no mapping" type code, distinct from every valid code.
pub const TYPE_CODE_NULL: i32 = 0;

/// Common scalar types a data-set declaration may map native codes onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommonType {
    String,
    Integer,
    Decimal,
    Double,
    Date,
    Time,
    Timestamp,
    Boolean,
    Blob,
    Clob,
}

/// Declaration string for the string common type.
pub const COMMON_TYPE_STRING: &str = "string";
/// Declaration string for the integer common type.
pub const COMMON_TYPE_INTEGER: &str = "integer";
/// Declaration string for the decimal common type.
pub const COMMON_TYPE_DECIMAL: &str = "decimal";
/// Declaration string for the double common type.
pub const COMMON_TYPE_DOUBLE: &str = "double";
/// Declaration string for the date common type.
pub const COMMON_TYPE_DATE: &str = "date";
/// Declaration string for the time common type.
pub const COMMON_TYPE_TIME: &str = "time";
/// Declaration string for the timestamp common type.
pub const COMMON_TYPE_TIMESTAMP: &str = "timestamp";
/// Declaration string for the boolean common type.
pub const COMMON_TYPE_BOOLEAN: &str = "boolean";
/// Declaration string for the blob common type.
pub const COMMON_TYPE_BLOB: &str = "blob";
/// Declaration string for the clob common type.
pub const COMMON_TYPE_CLOB: &str = "clob";

const SUPPORTED_COMMON_TYPE_NAMES: &[&str] = &[
    COMMON_TYPE_STRING,
    COMMON_TYPE_INTEGER,
    COMMON_TYPE_DECIMAL,
    COMMON_TYPE_DOUBLE,
    COMMON_TYPE_DATE,
    COMMON_TYPE_TIME,
    COMMON_TYPE_TIMESTAMP,
    COMMON_TYPE_BOOLEAN,
    COMMON_TYPE_BLOB,
    COMMON_TYPE_CLOB,
];

/// Returns supported common-type declaration strings.
pub fn supported_common_type_names() -> &'static [&'static str] {
    SUPPORTED_COMMON_TYPE_NAMES
}

impl CommonType {
    /// Stable string used in `common_type` attribute declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => COMMON_TYPE_STRING,
            Self::Integer => COMMON_TYPE_INTEGER,
            Self::Decimal => COMMON_TYPE_DECIMAL,
            Self::Double => COMMON_TYPE_DOUBLE,
            Self::Date => COMMON_TYPE_DATE,
            Self::Time => COMMON_TYPE_TIME,
            Self::Timestamp => COMMON_TYPE_TIMESTAMP,
            Self::Boolean => COMMON_TYPE_BOOLEAN,
            Self::Blob => COMMON_TYPE_BLOB,
            Self::Clob => COMMON_TYPE_CLOB,
        }
    }

    /// Stable numeric code, never equal to `TYPE_CODE_NULL`.
    pub fn type_code(self) -> i32 {
        match self {
            Self::String => 1,
            Self::Integer => 2,
            Self::Decimal => 3,
            Self::Double => 4,
            Self::Date => 5,
            Self::Time => 6,
            Self::Timestamp => 7,
            Self::Boolean => 8,
            Self::Blob => 9,
            Self::Clob => 10,
        }
    }

    /// Parses a declared common-type string, ignoring surrounding whitespace.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim() {
            COMMON_TYPE_STRING => Some(Self::String),
            COMMON_TYPE_INTEGER => Some(Self::Integer),
            COMMON_TYPE_DECIMAL => Some(Self::Decimal),
            COMMON_TYPE_DOUBLE => Some(Self::Double),
            COMMON_TYPE_DATE => Some(Self::Date),
            COMMON_TYPE_TIME => Some(Self::Time),
            COMMON_TYPE_TIMESTAMP => Some(Self::Timestamp),
            COMMON_TYPE_BOOLEAN => Some(Self::Boolean),
            COMMON_TYPE_BLOB => Some(Self::Blob),
            COMMON_TYPE_CLOB => Some(Self::Clob),
            _ => None,
        }
    }
}

/// Validated representation of one nested data-set declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSetType {
    id: String,
    display_name: String,
    type_mappings: BTreeMap<i32, CommonType>,
}

impl DataSetType {
    /// Builds a data-set type from its declaring element.
    ///
    /// # Errors
    /// - `MissingAttribute` when `id`, or a mapping's `native_code` or
    ///   `common_type`, is absent or blank.
    /// - `InvalidNativeCode` when a mapping's native code is not an integer.
    /// - `UnsupportedCommonType` when a mapping names an unknown common type.
    pub fn from_element(element: &ConfigElement) -> Result<Self, ManifestError> {
        let id = element
            .attribute(ID_ATTRIBUTE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ManifestError::MissingAttribute {
                attribute: ID_ATTRIBUTE.to_string(),
                element: element.name.clone(),
            })?
            .to_string();

        let mut type_mappings = BTreeMap::new();
        for mapping in element.children_named(TYPE_MAPPING_ELEMENT) {
            let native_value = mapping
                .attribute(NATIVE_CODE_ATTRIBUTE)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ManifestError::MissingAttribute {
                    attribute: NATIVE_CODE_ATTRIBUTE.to_string(),
                    element: TYPE_MAPPING_ELEMENT.to_string(),
                })?;
            let native_code: i32 =
                native_value
                    .parse()
                    .map_err(|_| ManifestError::InvalidNativeCode {
                        data_set_id: id.clone(),
                        value: native_value.to_string(),
                    })?;

            let common_value = mapping
                .attribute(COMMON_TYPE_ATTRIBUTE)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ManifestError::MissingAttribute {
                    attribute: COMMON_TYPE_ATTRIBUTE.to_string(),
                    element: TYPE_MAPPING_ELEMENT.to_string(),
                })?;
            let common_type = CommonType::from_name(common_value).ok_or_else(|| {
                ManifestError::UnsupportedCommonType {
                    data_set_id: id.clone(),
                    value: common_value.to_string(),
                }
            })?;

            // Duplicate native codes: the last declared mapping applies.
            type_mappings.insert(native_code, common_type);
        }

        let display_name = resolve_display_name(element);
        Ok(Self {
            id,
            display_name,
            type_mappings,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the number of declared native-to-common mappings.
    pub fn mapping_count(&self) -> usize {
        self.type_mappings.len()
    }

    /// Returns the common type mapped from one native code.
    pub fn common_type(&self, native_code: i32) -> Option<CommonType> {
        self.type_mappings.get(&native_code).copied()
    }

    /// Returns the common type code for one native code, or `TYPE_CODE_NULL`
    /// when no mapping is declared.
    pub fn default_type_code(&self, native_code: i32) -> i32 {
        self.common_type(native_code)
            .map(CommonType::type_code)
            .unwrap_or(TYPE_CODE_NULL)
    }
}
