//! Typed config elements built from resolved records.

mod factory;

pub use factory::{ConfigElementError, SchemaElementFactory};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of a declared schema element, as named by its `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// `graphql_type`
    #[serde(rename = "graphql_type")]
    Object,
    /// `graphql_interface`
    #[serde(rename = "graphql_interface")]
    Interface,
    /// `graphql_input`
    #[serde(rename = "graphql_input")]
    Input,
    /// `graphql_enum`
    #[serde(rename = "graphql_enum")]
    Enum,
    /// `graphql_union`
    #[serde(rename = "graphql_union")]
    Union,
}

impl ElementKind {
    /// Parse a `type` attribute value
    pub fn parse(element_type: &str) -> Option<Self> {
        match element_type {
            "graphql_type" => Some(ElementKind::Object),
            "graphql_interface" => Some(ElementKind::Interface),
            "graphql_input" => Some(ElementKind::Input),
            "graphql_enum" => Some(ElementKind::Enum),
            "graphql_union" => Some(ElementKind::Union),
            _ => None,
        }
    }

    /// The `type` attribute value for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Object => "graphql_type",
            ElementKind::Interface => "graphql_interface",
            ElementKind::Input => "graphql_input",
            ElementKind::Enum => "graphql_enum",
            ElementKind::Union => "graphql_union",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An argument accepted by a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name
    pub name: String,
    /// Named type of the argument (or of its items, for lists)
    pub type_name: String,
    /// Whether the argument is non-null
    pub required: bool,
    /// Whether the argument is a list
    pub is_list: bool,
    /// Default value, if declared
    pub default_value: Option<Value>,
    /// Description, if declared
    pub description: Option<String>,
}

/// A field of an object, interface or input type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Named type of the field (or of its items, for lists)
    pub type_name: String,
    /// Whether the field is non-null
    pub required: bool,
    /// Whether the field is a list
    pub is_list: bool,
    /// Resolver reference, if declared
    pub resolver: Option<String>,
    /// Description, if declared
    pub description: Option<String>,
    /// Deprecation reason, if the field is deprecated
    pub deprecation_reason: Option<String>,
    /// Arguments, ordered by name
    pub arguments: Vec<Argument>,
}

/// `graphql_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Type name
    pub name: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Interfaces the type implements
    pub interfaces: Vec<String>,
    /// Fields, ordered by name
    pub fields: Vec<Field>,
}

/// `graphql_interface`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceType {
    /// Interface name
    pub name: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Reference to the resolver picking the concrete type
    pub type_resolver: String,
    /// Fields, ordered by name
    pub fields: Vec<Field>,
}

/// `graphql_input`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectType {
    /// Input type name
    pub name: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Fields, ordered by name
    pub fields: Vec<Field>,
}

/// A value of an enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name as exposed in the schema
    pub name: String,
    /// Internal value the name maps to
    pub value: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Deprecation reason, if the value is deprecated
    pub deprecation_reason: Option<String>,
}

/// `graphql_enum`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    /// Enum name
    pub name: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Values, in declaration order
    pub values: Vec<EnumValue>,
}

/// `graphql_union`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    /// Union name
    pub name: String,
    /// Description, if declared
    pub description: Option<String>,
    /// Reference to the resolver picking the concrete type
    pub type_resolver: String,
    /// Member type names
    pub types: Vec<String>,
}

/// A typed schema element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigElement {
    /// Object type
    Object(ObjectType),
    /// Interface
    Interface(InterfaceType),
    /// Input object
    Input(InputObjectType),
    /// Enum
    Enum(EnumType),
    /// Union
    Union(UnionType),
}

impl ConfigElement {
    /// Element name
    pub fn name(&self) -> &str {
        match self {
            ConfigElement::Object(element) => &element.name,
            ConfigElement::Interface(element) => &element.name,
            ConfigElement::Input(element) => &element.name,
            ConfigElement::Enum(element) => &element.name,
            ConfigElement::Union(element) => &element.name,
        }
    }

    /// Element kind
    pub fn kind(&self) -> ElementKind {
        match self {
            ConfigElement::Object(_) => ElementKind::Object,
            ConfigElement::Interface(_) => ElementKind::Interface,
            ConfigElement::Input(_) => ElementKind::Input,
            ConfigElement::Enum(_) => ElementKind::Enum,
            ConfigElement::Union(_) => ElementKind::Union,
        }
    }

    /// Fields of the element; enums and unions have none
    pub fn fields(&self) -> &[Field] {
        match self {
            ConfigElement::Object(element) => &element.fields,
            ConfigElement::Interface(element) => &element.fields,
            ConfigElement::Input(element) => &element.fields,
            ConfigElement::Enum(_) | ConfigElement::Union(_) => &[],
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|field| field.name == name)
    }
}
