//! Schema config service: loads the schema sources once, replaces the whole
//! store on reload, and hands out one resolver per query.

use schema_config_core::{
    ConfigElementResolver, DeclaredType, QueryFieldFilter, QueryFields, SchemaElementFactory,
};
use schema_config_monitoring::LogExt;
use schema_config_store::{
    load_sources, ConfigStore, InMemoryConfigStore, SchemaSource, SharedConfigStore,
};
use std::sync::Arc;
use tracing::info;

use crate::error::ServiceResult;
use crate::settings::SchemaConfigSettings;

/// Resolver handed out per query: a fixed store snapshot and the default factory
pub type QueryResolver<Q> =
    ConfigElementResolver<Arc<InMemoryConfigStore>, SchemaElementFactory, Q>;

/// Owns the loaded schema configuration
#[derive(Debug)]
pub struct SchemaConfigService {
    sources: Vec<Box<dyn SchemaSource>>,
    store: SharedConfigStore,
    factory: SchemaElementFactory,
}

impl SchemaConfigService {
    /// Load every source configured in `settings`
    pub async fn load(settings: &SchemaConfigSettings) -> ServiceResult<Self> {
        Self::from_sources(settings.schema_sources()).await
    }

    /// Load the given sources, merged in order
    pub async fn from_sources(sources: Vec<Box<dyn SchemaSource>>) -> ServiceResult<Self> {
        let store = load_sources(&sources).await?;
        info!(element_count = store.len(), "Schema config service ready");

        Ok(Self {
            sources,
            store: SharedConfigStore::new(store),
            factory: SchemaElementFactory::new(),
        })
    }

    /// Re-read every source and swap the new store in.
    ///
    /// On failure the current store stays in place. Returns the new element count.
    pub async fn reload(&self) -> ServiceResult<usize> {
        let store = load_sources(&self.sources)
            .await
            .log_err("Schema config reload failed, keeping current store")?;
        let element_count = store.len();
        self.store.replace(store);
        Ok(element_count)
    }

    /// Resolver for one query.
    ///
    /// The resolver keeps the store snapshot current at the time of the call,
    /// so a reload during the query does not change what it sees.
    pub fn resolver<Q: QueryFieldFilter>(&self, query_fields: Q) -> QueryResolver<Q> {
        ConfigElementResolver::new(self.store.snapshot(), self.factory, query_fields)
    }

    /// Name and type of every typed element
    pub fn declared_types(&self) -> Vec<DeclaredType> {
        self.resolver(QueryFields::new()).list_declared_types()
    }

    /// The shared store
    pub fn store(&self) -> &SharedConfigStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_config_store::InlineSource;

    fn sources() -> Vec<Box<dyn SchemaSource>> {
        vec![Box::new(InlineSource::yaml(
            "catalog",
            r#"
            elements:
              - name: Money
                type: graphql_type
                fields:
                  value: { type: Float }
                  currency: { type: String }
              - name: Untyped
            "#,
        ))]
    }

    #[tokio::test]
    async fn test_resolver_uses_loaded_store() {
        let service = SchemaConfigService::from_sources(sources()).await.unwrap();

        let resolver = service.resolver(QueryFields::from_names(["value"]));
        let money = resolver.resolve("Money").unwrap();
        assert_eq!(money.fields().len(), 1);
        assert_eq!(money.fields()[0].name, "value");

        assert_eq!(service.declared_types().len(), 1);
        assert_eq!(service.store().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_source_list() {
        let service = SchemaConfigService::from_sources(Vec::new()).await.unwrap();
        assert!(service.declared_types().is_empty());
        assert_eq!(service.reload().await.unwrap(), 0);
    }
}
