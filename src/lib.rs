//! # Schema Config
//!
//! Access to the declared GraphQL schema configuration: element records are
//! loaded from YAML/JSON sources, looked up by name, pruned to the fields the
//! current query uses and built into typed config elements.
//!
//! ## Example
//!
//! ```
//! use schema_config::{InlineSource, QueryFields, SchemaConfigService, SchemaSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sources: Vec<Box<dyn SchemaSource>> = vec![Box::new(InlineSource::yaml(
//!     "catalog",
//!     r#"
//! elements:
//!   - name: ProductInterface
//!     type: graphql_interface
//!     typeResolver: ProductTypeResolver
//!     fields:
//!       sku: { type: String }
//!       name: { type: String }
//!       price: { type: Float }
//! "#,
//! ))];
//! let service = SchemaConfigService::from_sources(sources).await?;
//!
//! let query_fields = QueryFields::from_query("{ products { items { sku price } } }", None)?;
//! let product = service.resolver(&query_fields).resolve("ProductInterface")?;
//!
//! let names: Vec<&str> = product.fields().iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, vec!["price", "sku"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;
pub mod settings;

pub use error::{ServiceError, ServiceResult, SettingsError};
pub use service::{QueryResolver, SchemaConfigService};
pub use settings::SchemaConfigSettings;

pub use schema_config_core::{
    ConfigElement, ConfigElementError, ConfigElementFactory, ConfigElementResolver,
    DeclaredType, ElementKind, QueryFieldFilter, QueryFields, QueryFieldsError, ResolveError,
    ResolvedElement, SchemaElementFactory,
};
pub use schema_config_monitoring::{init_logging, LogExt, MonitoringConfig};
pub use schema_config_store::{
    ConfigStore, DeclaredElement, FileSource, InMemoryConfigStore, InlineSource, SchemaSource,
    SharedConfigStore, SourceFormat, StoreError,
};

/// Initialize logging from service settings
pub fn init_logging_from(settings: &SchemaConfigSettings) -> anyhow::Result<()> {
    init_logging(&settings.monitoring_config())
}

/// Returns a version string for the crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
