//! Tracking of the field names an in-flight query references.
//!
//! The request layer builds one `QueryFields` per query, before any element
//! is resolved, and drops it when the query completes. An empty set means
//! nothing is being tracked and no pruning should happen.

use async_graphql_parser::types::{ExecutableDocument, Selection, SelectionSet};
use async_graphql_value::Value as GraphQLValue;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Source of the field names referenced by the current query
pub trait QueryFieldFilter {
    /// Field names used in the current query; empty means "do not filter"
    fn fields_used_in_query(&self) -> BTreeSet<String>;
}

impl<T: QueryFieldFilter + ?Sized> QueryFieldFilter for &T {
    fn fields_used_in_query(&self) -> BTreeSet<String> {
        (**self).fields_used_in_query()
    }
}

impl<T: QueryFieldFilter + ?Sized> QueryFieldFilter for Arc<T> {
    fn fields_used_in_query(&self) -> BTreeSet<String> {
        (**self).fields_used_in_query()
    }
}

/// Errors raised while collecting query fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFieldsError {
    /// The query text is not a valid GraphQL executable document
    #[error("GraphQL query parsing error: {0}")]
    Parse(String),
}

/// Field names referenced by a single query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFields {
    names: BTreeSet<String>,
}

impl QueryFields {
    /// An empty set: nothing is tracked, nothing is pruned
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an explicit set of names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect names from a GraphQL query and its JSON variables.
    ///
    /// Field names, argument names and the keys of input object literals are
    /// taken from every operation and fragment definition. Object keys are
    /// taken from the variables at any depth.
    ///
    /// Introspection documents track nothing: every field must stay visible
    /// while the schema is being described.
    pub fn from_query(query: &str, variables: Option<&Value>) -> Result<Self, QueryFieldsError> {
        let document = async_graphql_parser::parse_query(query)
            .map_err(|err| QueryFieldsError::Parse(err.to_string()))?;

        if is_introspection(&document) {
            debug!("Introspection query, no fields tracked");
            return Ok(Self::new());
        }

        let mut fields = Self::new();
        fields.collect_document(&document);
        if let Some(variables) = variables {
            fields.collect_variables(variables);
        }

        debug!(field_count = fields.len(), "Collected fields used in query");
        Ok(fields)
    }

    /// Track one more name
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Whether `name` is referenced
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of tracked names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Tracked names, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    fn collect_document(&mut self, document: &ExecutableDocument) {
        for (_, operation) in document.operations.iter() {
            self.collect_selection_set(&operation.node.selection_set.node);
        }
        for fragment in document.fragments.values() {
            self.collect_selection_set(&fragment.node.selection_set.node);
        }
    }

    fn collect_selection_set(&mut self, selection_set: &SelectionSet) {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    self.insert(field.node.name.node.as_str());
                    for (name, value) in &field.node.arguments {
                        self.insert(name.node.as_str());
                        self.collect_argument_value(&value.node);
                    }
                    self.collect_selection_set(&field.node.selection_set.node);
                }
                Selection::InlineFragment(fragment) => {
                    self.collect_selection_set(&fragment.node.selection_set.node);
                }
                // Spread targets are walked through the fragment definitions
                Selection::FragmentSpread(_) => {}
            }
        }
    }

    fn collect_argument_value(&mut self, value: &GraphQLValue) {
        match value {
            GraphQLValue::Object(object) => {
                for (key, nested) in object {
                    self.insert(key.as_str());
                    self.collect_argument_value(nested);
                }
            }
            GraphQLValue::List(items) => {
                for item in items {
                    self.collect_argument_value(item);
                }
            }
            _ => {}
        }
    }

    fn collect_variables(&mut self, value: &Value) {
        match value {
            Value::Object(object) => {
                for (key, nested) in object {
                    self.insert(key.as_str());
                    self.collect_variables(nested);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.collect_variables(item);
                }
            }
            _ => {}
        }
    }
}

/// Root fields that turn a document into an introspection query
const INTROSPECTION_FIELDS: [&str; 2] = ["__schema", "__type"];

const INTROSPECTION_OPERATION: &str = "IntrospectionQuery";

fn is_introspection(document: &ExecutableDocument) -> bool {
    let named = document.operations.iter().any(|(name, _)| {
        name.is_some_and(|name| name.as_str() == INTROSPECTION_OPERATION)
    });
    if named {
        return true;
    }

    let mut root_fields = QueryFields::new();
    root_fields.collect_document(document);
    INTROSPECTION_FIELDS
        .iter()
        .any(|field| root_fields.contains(field))
}

impl QueryFieldFilter for QueryFields {
    fn fields_used_in_query(&self) -> BTreeSet<String> {
        self.names.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for QueryFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}
