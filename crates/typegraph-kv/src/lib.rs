//! Storage collaborator for the typegraph encoder.
//!
//! The encoder needs very little from its store: an existence check by exact key,
//! value retrieval by exact key, and an atomic multi-key batch write. [`KvStore`]
//! captures exactly that; [`MemoryStore`] and [`SqliteStore`] implement it.

mod error;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// One pending write: `value` may be empty (edge markers carry no payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Entry {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Entry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A persistent, sorted key-value store.
pub trait KvStore {
    /// Whether `key` is present.
    fn exists(&self, key: &[u8]) -> StoreResult<bool>;

    /// The value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Writes all entries or none of them. Later entries win over earlier ones
    /// with the same key.
    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()>;

    /// Number of stored keys.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()> {
        (**self).write_batch(entries)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}
