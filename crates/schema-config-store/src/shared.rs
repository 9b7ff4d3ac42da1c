//! Shared, replaceable config store.
//!
//! Readers take a snapshot of the current store; a reload swaps in a freshly
//! built store as a whole, so nobody ever observes a half-loaded one.

use crate::{ConfigStore, DeclaredElement, InMemoryConfigStore};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Thread-safe handle to the current config store.
#[derive(Clone)]
pub struct SharedConfigStore {
    current: Arc<RwLock<Arc<InMemoryConfigStore>>>,
}

impl fmt::Debug for SharedConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedConfigStore")
            .field("element_count", &self.current.read().len())
            .finish()
    }
}

impl SharedConfigStore {
    /// Wrap an already loaded store
    pub fn new(store: InMemoryConfigStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// Get the store as it is right now
    pub fn snapshot(&self) -> Arc<InMemoryConfigStore> {
        self.current.read().clone()
    }

    /// Replace the whole store, returning the previous one
    pub fn replace(&self, store: InMemoryConfigStore) -> Arc<InMemoryConfigStore> {
        let next = Arc::new(store);
        let element_count = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(
            previous_count = previous.len(),
            element_count, "Config store replaced"
        );
        previous
    }
}

impl Default for SharedConfigStore {
    fn default() -> Self {
        Self::new(InMemoryConfigStore::new())
    }
}

impl ConfigStore for SharedConfigStore {
    fn get(&self, name: &str) -> Option<Arc<DeclaredElement>> {
        self.snapshot().get(name)
    }

    fn get_all(&self) -> Vec<Arc<DeclaredElement>> {
        self.snapshot().get_all()
    }

    fn len(&self) -> usize {
        self.snapshot().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_is_visible_to_readers() {
        let shared = SharedConfigStore::new(InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("Old", "graphql_type"),
        ]));
        let reader = shared.clone();
        assert!(reader.get("Old").is_some());

        let previous = shared.replace(InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("New", "graphql_type"),
        ]));

        assert!(previous.get("Old").is_some());
        assert!(reader.get("Old").is_none());
        assert!(reader.get("New").is_some());
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedConfigStore::new(InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("Old", "graphql_type"),
        ]));
        let snapshot = shared.snapshot();

        shared.replace(InMemoryConfigStore::new());

        assert_eq!(snapshot.len(), 1);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedConfigStore::new(InMemoryConfigStore::from_elements(vec![
            DeclaredElement::new("Product", "graphql_type"),
        ]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reader = shared.clone();
                std::thread::spawn(move || reader.get("Product").is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
