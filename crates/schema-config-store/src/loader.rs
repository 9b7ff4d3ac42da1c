use crate::source::{SchemaSource, SourceFormat};
use crate::{DeclaredElement, InMemoryConfigStore, StoreError, StoreResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

lazy_static! {
    static ref GRAPHQL_NAME: Regex = Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap();
}

/// Top-level shape of a schema source document
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    elements: Vec<DeclaredElement>,
}

/// Parse a schema source document into declared elements.
///
/// This checks that element and field names are valid GraphQL names. It does
/// not require a `type` on every element: untyped records are kept and
/// rejected later, on lookup.
pub fn parse_elements(content: &str, format: SourceFormat) -> StoreResult<Vec<DeclaredElement>> {
    let document: SchemaDocument = match format {
        SourceFormat::Yaml => serde_yaml::from_str(content)?,
        SourceFormat::Json => serde_json::from_str(content)?,
    };

    for element in &document.elements {
        validate_names(element)?;
    }

    Ok(document.elements)
}

fn validate_names(element: &DeclaredElement) -> StoreResult<()> {
    if !GRAPHQL_NAME.is_match(&element.name) {
        return Err(StoreError::InvalidName {
            element: element.name.clone(),
            name: element.name.clone(),
        });
    }

    if let Some(fields) = &element.fields {
        if let Some(field_name) = fields.keys().find(|name| !GRAPHQL_NAME.is_match(name)) {
            return Err(StoreError::InvalidName {
                element: element.name.clone(),
                name: field_name.clone(),
            });
        }
    }

    Ok(())
}

/// Merge `overlay` declarations on top of `base`.
///
/// For a name declared on both sides, a `type` in the overlay wins, other
/// attributes are replaced key by key and fields merge one by one: existing
/// fields keep their position and take the overlay payload, new ones are
/// appended. Names only in the overlay are appended in overlay order.
pub fn merge_elements(
    base: Vec<DeclaredElement>,
    overlay: Vec<DeclaredElement>,
) -> Vec<DeclaredElement> {
    let mut merged = base;
    let mut positions: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(position, element)| (element.name.clone(), position))
        .collect();

    for element in overlay {
        match positions.get(&element.name) {
            Some(&position) => merge_into(&mut merged[position], element),
            None => {
                positions.insert(element.name.clone(), merged.len());
                merged.push(element);
            }
        }
    }

    merged
}

fn merge_into(target: &mut DeclaredElement, overlay: DeclaredElement) {
    if overlay.element_type.is_some() {
        target.element_type = overlay.element_type;
    }

    for (key, value) in overlay.attributes {
        target.attributes.insert(key, value);
    }

    if let Some(fields) = overlay.fields {
        let target_fields = target.fields.get_or_insert_with(Default::default);
        for (name, config) in fields {
            target_fields.insert(name, config);
        }
    }
}

/// Read every source in order and merge them into a single store
pub async fn load_sources(sources: &[Box<dyn SchemaSource>]) -> StoreResult<InMemoryConfigStore> {
    let mut elements = Vec::new();

    for source in sources {
        let declared = source.read().await?;
        debug!(
            source = %source.describe(),
            element_count = declared.len(),
            "Loaded schema source"
        );
        elements = merge_elements(elements, declared);
    }

    let store = InMemoryConfigStore::from_elements(elements);
    info!(
        source_count = sources.len(),
        element_count = store.names().count(),
        "Schema configuration loaded"
    );
    Ok(store)
}
