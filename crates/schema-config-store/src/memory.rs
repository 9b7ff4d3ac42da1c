//! In-memory implementation of ConfigStore
//!
//! The store is built once from a list of declared elements and is read-only
//! afterwards. Declaration order is kept for listing.

use crate::{ConfigStore, DeclaredElement};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// In-memory, immutable implementation of ConfigStore
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    elements: Vec<Arc<DeclaredElement>>,
    index: HashMap<String, usize>,
}

impl InMemoryConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from declared elements.
    ///
    /// A later element with a name that was already seen replaces the earlier
    /// record but keeps its position.
    pub fn from_elements(elements: impl IntoIterator<Item = DeclaredElement>) -> Self {
        let mut store = Self::new();
        for element in elements {
            match store.index.get(&element.name) {
                Some(&position) => {
                    store.elements[position] = Arc::new(element);
                }
                None => {
                    store.index.insert(element.name.clone(), store.elements.len());
                    store.elements.push(Arc::new(element));
                }
            }
        }
        store
    }

    /// Names of all declared elements, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|element| element.name.as_str())
    }
}

impl FromIterator<DeclaredElement> for InMemoryConfigStore {
    fn from_iter<I: IntoIterator<Item = DeclaredElement>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>> {
        self.index
            .get(name)
            .map(|&position| self.elements[position].clone())
    }

    fn get_all(&self) -> Vec<Arc<DeclaredElement>> {
        self.elements.clone()
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_store() -> InMemoryConfigStore {
        InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("ProductInterface", "graphql_interface")
                .with_field("sku", json!({ "type": "String" })),
            DeclaredElement::untyped("Orphan"),
            DeclaredElement::new("Money", "graphql_type"),
        ])
    }

    #[test]
    fn test_get_existing_and_missing() {
        let store = sample_store();

        let product = store.get("ProductInterface").expect("declared element");
        assert_eq!(product.element_type.as_deref(), Some("graphql_interface"));

        assert!(store.get("NonExistentType").is_none());
    }

    #[test]
    fn test_get_all_keeps_declaration_order() {
        let store = sample_store();

        let names: Vec<String> = store.get_all().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["ProductInterface", "Orphan", "Money"]);

        // Stable across repeated calls
        let again: Vec<String> = store.get_all().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, again);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let store = InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("A", "graphql_type"),
            DeclaredElement::new("B", "graphql_type"),
            DeclaredElement::new("A", "graphql_input"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(
            store.get("A").unwrap().element_type.as_deref(),
            Some("graphql_input")
        );
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryConfigStore::new();
        assert!(store.is_empty());
        assert!(store.get_all().is_empty());
    }
}
