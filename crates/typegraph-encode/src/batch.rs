use typegraph_kv::Entry;

use crate::keys::Key;

/// Writes staged during one package ingestion. Nothing here is visible to store
/// readers until the batch is flushed as a whole.
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<Entry>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, value: impl Into<Vec<u8>>) {
        log::trace!("staging {key}");
        self.entries.push(Entry::new(key.into_bytes(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last value staged under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}
