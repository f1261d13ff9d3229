//! In-memory document store for tests and ephemeral embedders.

use crate::repo::document_store::{DocumentStore, StorageKey, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Single-threaded map of raw documents.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RefCell<BTreeMap<StorageKey, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently holding a document.
    pub fn len(&self) -> usize {
        self.documents.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.borrow().is_empty()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get_raw(&self, key: StorageKey) -> StoreResult<Option<String>> {
        Ok(self.documents.borrow().get(&key).cloned())
    }

    fn set_raw(&self, key: StorageKey, value: &str) -> StoreResult<()> {
        self.documents.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove_many(&self, keys: &[StorageKey]) -> StoreResult<()> {
        let mut documents = self.documents.borrow_mut();
        for key in keys {
            documents.remove(key);
        }
        Ok(())
    }
}
