use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::{Entry, KvStore, StoreResult};

/// A sorted in-memory store. Used by tests and dry runs; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    batches: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches written so far.
    pub fn batch_count(&self) -> usize {
        *self.batches.read()
    }

    /// A copy of every entry in key order.
    pub fn entries(&self) -> Vec<Entry> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| Entry::new(k.clone(), v.clone()))
            .collect()
    }

    /// Keys starting with `prefix`, in order.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.data
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl KvStore for MemoryStore {
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.data.read().contains_key(key))
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()> {
        let mut data = self.data.write();
        log::debug!("memory store: writing batch of {} entries", entries.len());
        for entry in entries {
            data.insert(entry.key, entry.value);
        }
        *self.batches.write() += 1;
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.data.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_visible_after_write() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        store
            .write_batch(vec![Entry::new("b", "2"), Entry::new("a", ""), Entry::new("b", "3")])
            .unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert!(store.exists(b"a").unwrap());
        assert_eq!(store.get(b"a").unwrap(), Some(Vec::new()));
        assert_eq!(store.get(b"b").unwrap(), Some(b"3".to_vec()));
        assert_eq!(store.get(b"c").unwrap(), None);
        assert_eq!(store.batch_count(), 1);
    }

    #[test]
    fn prefix_listing_is_sorted() {
        let store = MemoryStore::new();
        store
            .write_batch(vec![
                Entry::new("types/2", "x"),
                Entry::new("pkgs/a", "x"),
                Entry::new("types/1", "x"),
            ])
            .unwrap();
        assert_eq!(
            store.keys_with_prefix(b"types/"),
            vec![b"types/1".to_vec(), b"types/2".to_vec()]
        );
    }
}
