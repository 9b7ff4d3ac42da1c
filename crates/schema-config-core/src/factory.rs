use schema_config_store::FieldConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A declared element after lookup and field pruning.
///
/// Only typed records ever become a `ResolvedElement`, and its fields are
/// held in ascending field-name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedElement {
    /// Element name
    pub name: String,

    /// Element kind, always present
    #[serde(rename = "type")]
    pub element_type: String,

    /// Remaining fields, sorted by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldConfig>>,

    /// Every other declared attribute, passed through unchanged
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ResolvedElement {
    /// Names of the remaining fields, in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .as_ref()
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Builds typed config elements from resolved records.
pub trait ConfigElementFactory {
    /// The element type produced
    type Element;

    /// The error raised for records the factory cannot build
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build an element from a pruned and ordered record
    fn create_from_config_data(&self, record: ResolvedElement) -> Result<Self::Element, Self::Error>;
}

impl<T: ConfigElementFactory + ?Sized> ConfigElementFactory for &T {
    type Element = T::Element;
    type Error = T::Error;

    fn create_from_config_data(&self, record: ResolvedElement) -> Result<Self::Element, Self::Error> {
        (**self).create_from_config_data(record)
    }
}

impl<T: ConfigElementFactory + ?Sized> ConfigElementFactory for Arc<T> {
    type Element = T::Element;
    type Error = T::Error;

    fn create_from_config_data(&self, record: ResolvedElement) -> Result<Self::Element, Self::Error> {
        (**self).create_from_config_data(record)
    }
}
