use super::{
    Argument, ConfigElement, ElementKind, EnumType, EnumValue, Field, InputObjectType,
    InterfaceType, ObjectType, UnionType,
};
use crate::factory::{ConfigElementFactory, ResolvedElement};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

/// Errors raised by the default element factory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigElementError {
    /// The `type` attribute names no known element kind
    #[error("Unknown element type \"{element_type}\" for config element \"{name}\"")]
    UnknownElementType {
        /// Element name
        name: String,
        /// Offending `type` value
        element_type: String,
    },

    /// A required attribute is missing
    #[error("Config element \"{element}\" is missing required attribute \"{attribute}\"")]
    MissingAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: &'static str,
    },

    /// Attributes do not have the expected shape
    #[error("Invalid attributes for config element \"{element}\": {reason}")]
    InvalidAttribute {
        /// Element name
        element: String,
        /// Deserialization failure
        reason: String,
    },

    /// A field payload does not have the expected shape
    #[error("Invalid field \"{field}\" in config element \"{element}\": {reason}")]
    InvalidField {
        /// Element name
        element: String,
        /// Field name
        field: String,
        /// Deserialization failure
        reason: String,
    },
}

impl ConfigElementError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigElementError::UnknownElementType { .. } => "ERR_ELEMENT_UNKNOWN_TYPE",
            ConfigElementError::MissingAttribute { .. } => "ERR_ELEMENT_MISSING_ATTRIBUTE",
            ConfigElementError::InvalidAttribute { .. } => "ERR_ELEMENT_INVALID_ATTRIBUTE",
            ConfigElementError::InvalidField { .. } => "ERR_ELEMENT_INVALID_FIELD",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldPayload {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    is_list: bool,
    #[serde(default)]
    resolver: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deprecation_reason: Option<String>,
    #[serde(default)]
    arguments: BTreeMap<String, ArgumentPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArgumentPayload {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    is_list: bool,
    #[serde(default)]
    default_value: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementAttributes {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    implements: Vec<String>,
    #[serde(default)]
    type_resolver: Option<String>,
    #[serde(default)]
    types: Option<Vec<String>>,
    #[serde(default)]
    values: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnumValuePayload {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deprecation_reason: Option<String>,
}

/// Default factory turning resolved records into `ConfigElement`s.
///
/// The element kind is picked from the record's `type` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaElementFactory;

impl SchemaElementFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self
    }

    fn build_fields(record: &ResolvedElement) -> Result<Vec<Field>, ConfigElementError> {
        let Some(fields) = &record.fields else {
            return Ok(Vec::new());
        };

        fields
            .iter()
            .map(|(name, config)| {
                let payload: FieldPayload =
                    serde_json::from_value(config.clone()).map_err(|err| {
                        ConfigElementError::InvalidField {
                            element: record.name.clone(),
                            field: name.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                Ok(Field {
                    name: name.clone(),
                    type_name: payload.type_name,
                    required: payload.required,
                    is_list: payload.is_list,
                    resolver: payload.resolver,
                    description: payload.description,
                    deprecation_reason: payload.deprecation_reason,
                    arguments: payload
                        .arguments
                        .into_iter()
                        .map(|(name, argument)| Argument {
                            name,
                            type_name: argument.type_name,
                            required: argument.required,
                            is_list: argument.is_list,
                            default_value: argument.default_value,
                            description: argument.description,
                        })
                        .collect(),
                })
            })
            .collect()
    }

    fn build_enum_values(
        element: &str,
        values: Map<String, Value>,
    ) -> Result<Vec<EnumValue>, ConfigElementError> {
        values
            .into_iter()
            .map(|(name, payload)| {
                let payload: EnumValuePayload = match payload {
                    Value::Null => EnumValuePayload::default(),
                    other => parse_attribute(element, other)?,
                };
                Ok(EnumValue {
                    value: payload.value.unwrap_or_else(|| name.clone()),
                    name,
                    description: payload.description,
                    deprecation_reason: payload.deprecation_reason,
                })
            })
            .collect()
    }
}

fn parse_attribute<T: DeserializeOwned>(element: &str, value: Value) -> Result<T, ConfigElementError> {
    serde_json::from_value(value).map_err(|err| ConfigElementError::InvalidAttribute {
        element: element.to_string(),
        reason: err.to_string(),
    })
}

fn required<T>(element: &str, attribute: &'static str, value: Option<T>) -> Result<T, ConfigElementError> {
    value.ok_or_else(|| ConfigElementError::MissingAttribute {
        element: element.to_string(),
        attribute,
    })
}

impl ConfigElementFactory for SchemaElementFactory {
    type Element = ConfigElement;
    type Error = ConfigElementError;

    fn create_from_config_data(&self, record: ResolvedElement) -> Result<ConfigElement, ConfigElementError> {
        let kind = ElementKind::parse(&record.element_type).ok_or_else(|| {
            ConfigElementError::UnknownElementType {
                name: record.name.clone(),
                element_type: record.element_type.clone(),
            }
        })?;
        trace!(name = %record.name, kind = %kind, "Building config element");

        let attributes: ElementAttributes =
            parse_attribute(&record.name, Value::Object(record.attributes.clone()))?;

        let element = match kind {
            ElementKind::Object => ConfigElement::Object(ObjectType {
                fields: Self::build_fields(&record)?,
                name: record.name,
                description: attributes.description,
                interfaces: attributes.implements,
            }),
            ElementKind::Interface => ConfigElement::Interface(InterfaceType {
                fields: Self::build_fields(&record)?,
                type_resolver: required(&record.name, "typeResolver", attributes.type_resolver)?,
                name: record.name,
                description: attributes.description,
            }),
            ElementKind::Input => ConfigElement::Input(InputObjectType {
                fields: Self::build_fields(&record)?,
                name: record.name,
                description: attributes.description,
            }),
            ElementKind::Enum => ConfigElement::Enum(EnumType {
                values: Self::build_enum_values(
                    &record.name,
                    attributes.values.unwrap_or_default(),
                )?,
                name: record.name,
                description: attributes.description,
            }),
            ElementKind::Union => ConfigElement::Union(UnionType {
                type_resolver: required(&record.name, "typeResolver", attributes.type_resolver)?,
                types: required(&record.name, "types", attributes.types)?,
                name: record.name,
                description: attributes.description,
            }),
        };

        Ok(element)
    }
}
