//! # Config Element Resolver
//!
//! Resolves declared schema element names into typed config elements.
//!
//! ## Resolution
//!
//! ```text
//! name -> ConfigStore::get -> typed? -> prune fields to the query -> sort by field name -> factory
//! ```
//!
//! An element missing from the store, or declared without a `type`, fails
//! with `ResolveError::SchemaElementNotDeclared`. When the query field set is
//! empty no pruning happens at all: every declared field is kept.
//!
//! ## Usage
//!
//! ```rust
//! use schema_config_core::{ConfigElementResolver, QueryFields, SchemaElementFactory};
//! use schema_config_store::{DeclaredElement, InMemoryConfigStore};
//! use serde_json::json;
//!
//! let store = InMemoryConfigStore::from_elements(vec![
//!     DeclaredElement::new("Money", "graphql_type")
//!         .with_field("value", json!({ "type": "Float" }))
//!         .with_field("currency", json!({ "type": "String" })),
//! ]);
//! let query_fields = QueryFields::from_names(["currency"]);
//!
//! let resolver = ConfigElementResolver::new(&store, SchemaElementFactory::new(), &query_fields);
//! let money = resolver.resolve("Money").unwrap();
//! assert_eq!(money.fields().len(), 1);
//! ```

use crate::error::ResolveError;
use crate::factory::{ConfigElementFactory, ResolvedElement};
use crate::query_fields::QueryFieldFilter;
use schema_config_store::{ConfigStore, DeclaredElement, FieldConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// One entry of the declared type listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredType {
    /// Element name
    pub name: String,
    /// Element kind, as declared
    #[serde(rename = "type")]
    pub element_type: String,
}

/// Resolves declared element names against a store, for one query context
#[derive(Debug, Clone)]
pub struct ConfigElementResolver<S, F, Q> {
    store: S,
    factory: F,
    query_fields: Q,
}

impl<S, F, Q> ConfigElementResolver<S, F, Q>
where
    S: ConfigStore,
    F: ConfigElementFactory,
    Q: QueryFieldFilter,
{
    /// Create a resolver over the given collaborators
    pub fn new(store: S, factory: F, query_fields: Q) -> Self {
        Self {
            store,
            factory,
            query_fields,
        }
    }

    /// Resolve `name` into a config element built by the factory
    pub fn resolve(&self, name: &str) -> Result<F::Element, ResolveError<F::Error>> {
        let record = match self.store.get(name) {
            Some(record) if record.is_typed() => record,
            Some(_) => {
                debug!(name, "Declared element has no type");
                return Err(ResolveError::SchemaElementNotDeclared(name.to_string()));
            }
            None => {
                debug!(name, "Element is not declared");
                return Err(ResolveError::SchemaElementNotDeclared(name.to_string()));
            }
        };

        let resolved = self.prune(&record);
        debug!(
            name,
            element_type = %resolved.element_type,
            field_count = resolved.fields.as_ref().map_or(0, BTreeMap::len),
            "Resolved config element"
        );

        self.factory
            .create_from_config_data(resolved)
            .map_err(ResolveError::Factory)
    }

    /// List name and type of every typed element, in store order
    pub fn list_declared_types(&self) -> Vec<DeclaredType> {
        self.store
            .get_all()
            .into_iter()
            .filter_map(|record| match &record.element_type {
                Some(element_type) if record.is_typed() => Some(DeclaredType {
                    name: record.name.clone(),
                    element_type: element_type.clone(),
                }),
                _ => {
                    trace!(name = %record.name, "Skipping untyped element");
                    None
                }
            })
            .collect()
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The element factory
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The query field filter
    pub fn query_fields(&self) -> &Q {
        &self.query_fields
    }

    fn prune(&self, record: &DeclaredElement) -> ResolvedElement {
        let fields = record.fields.as_ref().map(|fields| {
            let used = self.query_fields.fields_used_in_query();
            fields
                .iter()
                .filter(|(field_name, _)| used.is_empty() || used.contains(field_name.as_str()))
                .map(|(field_name, config)| (field_name.clone(), config.clone()))
                .collect::<BTreeMap<String, FieldConfig>>()
        });

        ResolvedElement {
            name: record.name.clone(),
            element_type: record.element_type.clone().unwrap_or_default(),
            fields,
            attributes: record.attributes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_fields::QueryFields;
    use mockall::mock;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use schema_config_store::InMemoryConfigStore;
    use serde_json::json;
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("rejected by factory: {0}")]
    struct Rejected(String);

    mock! {
        Factory {}
        impl ConfigElementFactory for Factory {
            type Element = ResolvedElement;
            type Error = Rejected;
            fn create_from_config_data(&self, record: ResolvedElement) -> Result<ResolvedElement, Rejected>;
        }
    }

    mock! {
        Fields {}
        impl QueryFieldFilter for Fields {
            fn fields_used_in_query(&self) -> BTreeSet<String>;
        }
    }

    mock! {
        Store {}
        impl ConfigStore for Store {
            fn get(&self, name: &str) -> Option<Arc<DeclaredElement>>;
            fn get_all(&self) -> Vec<Arc<DeclaredElement>>;
        }
    }

    impl std::fmt::Debug for MockStore {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockStore").finish_non_exhaustive()
        }
    }

    /// Initializes test tracing for unit tests
    fn init_test_tracing() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_target(false)
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Factory handing the pruned record straight back
    struct EchoFactory;

    impl ConfigElementFactory for EchoFactory {
        type Element = ResolvedElement;
        type Error = Rejected;

        fn create_from_config_data(&self, record: ResolvedElement) -> Result<ResolvedElement, Rejected> {
            Ok(record)
        }
    }

    fn product_store() -> InMemoryConfigStore {
        InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("ProductInterface", "Product")
                .with_field("sku", json!({ "type": "String" }))
                .with_field("name", json!({ "type": "String" }))
                .with_field("price", json!({ "type": "Float" })),
            DeclaredElement::untyped("Malformed").with_field("sku", json!({})),
            DeclaredElement::new("Money", "graphql_type"),
        ])
    }

    #[test]
    fn test_resolve_prunes_and_sorts_fields() {
        init_test_tracing();

        let store = product_store();
        let query_fields = QueryFields::from_names(["sku", "price"]);
        let resolver = ConfigElementResolver::new(&store, EchoFactory, &query_fields);

        let resolved = resolver.resolve("ProductInterface").unwrap();
        assert_eq!(resolved.element_type, "Product");
        assert_eq!(resolved.field_names(), vec!["price", "sku"]);
    }

    #[test]
    fn test_empty_query_fields_keep_everything() {
        let store = product_store();
        let resolver = ConfigElementResolver::new(&store, EchoFactory, QueryFields::new());

        let resolved = resolver.resolve("ProductInterface").unwrap();
        assert_eq!(resolved.field_names(), vec!["name", "price", "sku"]);
    }

    #[test]
    fn test_query_fields_not_on_element_leave_no_fields() {
        let store = product_store();
        let resolver =
            ConfigElementResolver::new(&store, EchoFactory, QueryFields::from_names(["items"]));

        let resolved = resolver.resolve("ProductInterface").unwrap();
        assert_eq!(resolved.fields, Some(BTreeMap::new()));
    }

    #[test]
    fn test_element_without_fields_skips_filter() {
        let store = product_store();
        let mut query_fields = MockFields::new();
        query_fields.expect_fields_used_in_query().never();

        let resolver = ConfigElementResolver::new(&store, EchoFactory, query_fields);
        let resolved = resolver.resolve("Money").unwrap();
        assert_eq!(resolved.fields, None);
    }

    #[test]
    fn test_missing_and_untyped_elements_are_not_declared() {
        init_test_tracing();

        let store = product_store();
        let resolver = ConfigElementResolver::new(&store, EchoFactory, QueryFields::new());

        assert_eq!(
            resolver.resolve("NonExistentType").unwrap_err(),
            ResolveError::SchemaElementNotDeclared("NonExistentType".to_string())
        );
        assert_eq!(
            resolver.resolve("Malformed").unwrap_err(),
            ResolveError::SchemaElementNotDeclared("Malformed".to_string())
        );
    }

    #[test]
    fn test_factory_error_passes_through() {
        let store = product_store();
        let mut factory = MockFactory::new();
        factory
            .expect_create_from_config_data()
            .times(1)
            .returning(|record| Err(Rejected(record.name)));

        let resolver = ConfigElementResolver::new(&store, factory, QueryFields::new());
        let err = resolver.resolve("ProductInterface").unwrap_err();
        assert_eq!(err, ResolveError::Factory(Rejected("ProductInterface".to_string())));
        assert_eq!(err.to_string(), "rejected by factory: ProductInterface");
    }

    #[test]
    fn test_factory_not_called_for_undeclared_element() {
        let store = product_store();
        let mut factory = MockFactory::new();
        factory.expect_create_from_config_data().never();

        let resolver = ConfigElementResolver::new(&store, factory, QueryFields::new());
        assert!(resolver.resolve("Nope").unwrap_err().is_not_declared());
    }

    #[test]
    fn test_store_lookup_uses_requested_name() {
        init_test_tracing();

        let mut store = MockStore::new();
        store
            .expect_get()
            .with(eq("Money"))
            .times(1)
            .returning(|_| Some(Arc::new(DeclaredElement::new("Money", "graphql_type"))));

        let resolver = ConfigElementResolver::new(store, EchoFactory, QueryFields::new());
        assert_eq!(resolver.resolve("Money").unwrap().name, "Money");
    }

    #[test]
    fn test_filter_is_read_once_per_resolve() {
        let store = product_store();
        let mut query_fields = MockFields::new();
        query_fields
            .expect_fields_used_in_query()
            .times(2)
            .returning(|| ["name".to_string()].into_iter().collect());

        let resolver = ConfigElementResolver::new(&store, EchoFactory, query_fields);
        let first = resolver.resolve("ProductInterface").unwrap();
        let second = resolver.resolve("ProductInterface").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.field_names(), vec!["name"]);
    }

    #[test]
    fn test_attributes_pass_through() {
        let store = InMemoryConfigStore::from_elements(vec![DeclaredElement::new(
            "ProductInterface",
            "graphql_interface",
        )
        .with_attribute("typeResolver", json!("ProductTypeResolver"))]);
        let resolver = ConfigElementResolver::new(&store, EchoFactory, QueryFields::new());

        let resolved = resolver.resolve("ProductInterface").unwrap();
        assert_eq!(
            resolved.attributes.get("typeResolver"),
            Some(&json!("ProductTypeResolver"))
        );
    }

    #[test]
    fn test_list_declared_types_skips_untyped() {
        let store = product_store();
        let resolver = ConfigElementResolver::new(&store, EchoFactory, QueryFields::new());

        assert_eq!(
            resolver.list_declared_types(),
            vec![
                DeclaredType {
                    name: "ProductInterface".to_string(),
                    element_type: "Product".to_string(),
                },
                DeclaredType {
                    name: "Money".to_string(),
                    element_type: "graphql_type".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_declared_type_serializes_with_type_key() {
        let entry = DeclaredType {
            name: "Money".to_string(),
            element_type: "graphql_type".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "name": "Money", "type": "graphql_type" })
        );
    }
}
