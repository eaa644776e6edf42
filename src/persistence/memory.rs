use std::collections::HashMap;

use super::BlobStore;
use crate::error::StoreError;

/// In-process blob store, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_whole_value() {
        let mut store = MemoryBlobStore::new();
        store.put("k", "[1,2]").unwrap();
        store.put("k", "[3]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[3]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let store = MemoryBlobStore::new();
        assert!(store.get("absent").unwrap().is_none());
        assert!(store.is_empty());
    }
}
