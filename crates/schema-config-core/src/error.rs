use thiserror::Error;

/// Error returned when resolving a declared schema element.
///
/// Factory failures are passed through untouched, so `E` is whatever error
/// type the configured `ConfigElementFactory` produces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError<E> {
    /// No record under that name, or the record carries no type
    #[error("Config element \"{0}\" is not declared in GraphQL schema")]
    SchemaElementNotDeclared(String),

    /// The factory rejected the pruned record
    #[error(transparent)]
    Factory(E),
}

impl<E> ResolveError<E> {
    /// Whether the element was missing or malformed in the store
    pub fn is_not_declared(&self) -> bool {
        matches!(self, ResolveError::SchemaElementNotDeclared(_))
    }

    /// The factory error, if that is what failed
    pub fn into_factory_error(self) -> Option<E> {
        match self {
            ResolveError::Factory(err) => Some(err),
            ResolveError::SchemaElementNotDeclared(_) => None,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::SchemaElementNotDeclared(_) => "ERR_SCHEMA_ELEMENT_NOT_DECLARED",
            ResolveError::Factory(_) => "ERR_CONFIG_ELEMENT_FACTORY",
        }
    }
}
