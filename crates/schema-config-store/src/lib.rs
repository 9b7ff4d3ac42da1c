//! Schema Config Store
//!
//! Provides the record model and the storage abstraction for declared GraphQL
//! schema elements. The `ConfigStore` trait defines a read-only contract for
//! looking up declared element records by name and listing all of them, and
//! the loader turns YAML/JSON schema sources into a populated store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Opaque per-field payload (type, arguments, resolver reference, ...)
pub type FieldConfig = Value;

/// Ordered map of field name to field payload, in declaration order
pub type FieldMap = Map<String, FieldConfig>;

/// A declared schema element record, as merged from every schema source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredElement {
    /// Element name, e.g. "ProductInterface"
    pub name: String,

    /// Element kind, e.g. "graphql_interface". Records without it are malformed.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    /// Declared fields, if the element kind has any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,

    /// Every other declared attribute (description, implements, values, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl DeclaredElement {
    /// Create a bare element with a name and a kind
    pub fn new(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: Some(element_type.into()),
            fields: None,
            attributes: Map::new(),
        }
    }

    /// Create an element that carries no kind
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: None,
            fields: None,
            attributes: Map::new(),
        }
    }

    /// Append a field declaration
    pub fn with_field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.fields
            .get_or_insert_with(Map::new)
            .insert(name.into(), config);
        self
    }

    /// Set an arbitrary attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Whether the record carries a non-empty kind
    pub fn is_typed(&self) -> bool {
        self.element_type.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Errors that can occur while building or loading a config store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read schema source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema source format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid GraphQL name \"{name}\" in element \"{element}\"")]
    InvalidName { element: String, name: String },
}

impl StoreError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "ERR_STORE_IO",
            StoreError::Yaml(_) => "ERR_STORE_YAML_PARSE",
            StoreError::Json(_) => "ERR_STORE_JSON_PARSE",
            StoreError::UnsupportedFormat(_) => "ERR_STORE_UNSUPPORTED_FORMAT",
            StoreError::InvalidName { .. } => "ERR_STORE_INVALID_NAME",
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to declared element records.
///
/// Implementations are populated once and never mutated afterwards; a reload
/// replaces the whole store.
pub trait ConfigStore: Send + Sync + Debug {
    /// Get the raw record declared under `name`
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>>;

    /// Get every declared record in the store's declaration order
    fn get_all(&self) -> Vec<Arc<DeclaredElement>>;

    /// Number of declared records
    fn len(&self) -> usize {
        self.get_all().len()
    }

    /// Whether no record is declared
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>> {
        (**self).get(name)
    }

    fn get_all(&self) -> Vec<Arc<DeclaredElement>> {
        (**self).get_all()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>> {
        (**self).get(name)
    }

    fn get_all(&self) -> Vec<Arc<DeclaredElement>> {
        (**self).get_all()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>> {
        (**self).get(name)
    }

    fn get_all(&self) -> Vec<Arc<DeclaredElement>> {
        (**self).get_all()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

pub mod loader;
pub mod memory;
pub mod shared;
pub mod source;

pub use loader::{load_sources, merge_elements, parse_elements};
pub use memory::InMemoryConfigStore;
pub use shared::SharedConfigStore;
pub use source::{FileSource, InlineSource, SchemaSource, SourceFormat};
