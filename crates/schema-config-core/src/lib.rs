//!
//! Schema Config Core - resolution of declared GraphQL schema elements
//!
//! This crate resolves declared schema element records into typed config
//! elements. Records come from a `ConfigStore`, are pruned down to the fields
//! referenced by the current query (`QueryFieldFilter`), ordered by field
//! name and handed to a `ConfigElementFactory`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Typed config elements and the default factory
pub mod element;

/// Error types
pub mod error;

/// Factory contract and the record it consumes
pub mod factory;

/// Query field tracking
pub mod query_fields;

/// Element resolution
pub mod resolver;

pub use element::{
    Argument, ConfigElement, ConfigElementError, ElementKind, EnumType, EnumValue, Field,
    InputObjectType, InterfaceType, ObjectType, SchemaElementFactory, UnionType,
};
pub use error::ResolveError;
pub use factory::{ConfigElementFactory, ResolvedElement};
pub use query_fields::{QueryFieldFilter, QueryFields, QueryFieldsError};
pub use resolver::{ConfigElementResolver, DeclaredType};

pub use schema_config_store::{ConfigStore, DeclaredElement, FieldConfig};
