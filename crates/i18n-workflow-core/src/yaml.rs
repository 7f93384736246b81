//! YAML form of a catalog.
//!
//! Writing goes through `serde_yaml`, which picks a quoting style per scalar
//! and falls back to explicit `? ` keys for very long keys. Since a
//! [`Document`] serializes its entries in sorted key order, the bytes depend
//! only on the document. A `---` header is put in front so files keep the
//! layout of earlier catalogs.

use serde_yaml::Value;
use tracing::warn;

use crate::document::Document;
use crate::error::{CatalogError, CatalogResult};

/// Render a document as YAML text.
///
/// Calling this twice on equal documents yields identical strings.
pub fn to_yaml(doc: &Document) -> CatalogResult<String> {
    let body = serde_yaml::to_string(doc).map_err(|e| CatalogError::Emit(e.to_string()))?;
    let header = if doc.is_empty() { "--- " } else { "---\n" };
    Ok(format!("{header}{body}"))
}

impl Document {
    /// Parse catalog text.
    ///
    /// Fails when the text is not YAML or its root is not a mapping. Nested
    /// numbers and booleans become their string form, `null` becomes `""`,
    /// and sequences are dropped.
    pub fn from_yaml_str(text: &str) -> CatalogResult<Self> {
        Self::from_yaml_slice(text.as_bytes())
    }

    /// Parse catalog bytes. Bytes that are not UTF-8 are invalid YAML.
    pub fn from_yaml_slice(bytes: &[u8]) -> CatalogResult<Self> {
        if is_blank(bytes) {
            return Err(CatalogError::NotAMapping { found: "null" });
        }
        let value: Value =
            serde_yaml::from_slice(bytes).map_err(|e| CatalogError::InvalidYaml(e.to_string()))?;
        match strip_tags(value) {
            Value::Mapping(mapping) => Ok(mapping_to_document(mapping)),
            other => Err(CatalogError::NotAMapping {
                found: value_kind(&other),
            }),
        }
    }

    /// Parse catalog text, treating anything malformed as an empty catalog.
    pub fn from_yaml_str_lenient(text: &str) -> Self {
        Self::from_yaml_slice_lenient(text.as_bytes())
    }

    /// Parse catalog bytes, treating anything malformed as an empty catalog.
    pub fn from_yaml_slice_lenient(bytes: &[u8]) -> Self {
        match Self::from_yaml_slice(bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "ignoring malformed catalog contents");
                Self::new()
            }
        }
    }
}

/// Returns `true` for input that holds no YAML content at all.
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => strip_tags(tagged.value),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn mapping_to_document(mapping: serde_yaml::Mapping) -> Document {
    let mut doc = Document::new();
    for (key, value) in mapping {
        let Some(key) = scalar_text(&strip_tags(key)) else {
            warn!("skipping catalog entry with a non-scalar key");
            continue;
        };
        match strip_tags(value) {
            Value::Mapping(child) => {
                doc.insert(key, mapping_to_document(child));
            }
            Value::Sequence(_) => {
                warn!(key = %key, "skipping sequence value in catalog");
            }
            scalar => {
                if let Some(text) = scalar_text(&scalar) {
                    doc.insert(key, text);
                }
            }
        }
    }
    doc
}
