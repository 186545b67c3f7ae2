#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use typegraph_encode::{unframe, Graph, GraphConfig, IdStrategy, Key};
use typegraph_kv::{Entry, KvStore, MemoryStore, StoreError, StoreResult};

/// Config with reproducible ids.
pub fn sequential_config() -> GraphConfig {
    let mut config = GraphConfig::default();
    config.ingest.ids = IdStrategy::Sequential;
    config
}

pub fn memory_graph() -> Graph<MemoryStore> {
    Graph::new(MemoryStore::new(), sequential_config())
}

/// Framed fields stored under `key`.
pub fn fields(store: &impl KvStore, key: &Key) -> Vec<Vec<u8>> {
    let value = store
        .get(key.as_bytes())
        .unwrap()
        .unwrap_or_else(|| panic!("nothing stored under {key}"));
    unframe(&value)
        .unwrap()
        .into_iter()
        .map(|f| f.to_vec())
        .collect()
}

pub fn varint(value: u64) -> Vec<u8> {
    typegraph_encode::frame::uvarint_bytes(value)
}

/// Renders a field as a quoted string when it looks like text, as hex otherwise.
pub fn render_field(bytes: &[u8]) -> String {
    let texty = bytes.first().is_some_and(|b| (0x20..0x7f).contains(b))
        && bytes.iter().all(|b| *b == 0 || (0x20..0x7f).contains(b));
    if bytes.is_empty() {
        "\"\"".to_string()
    } else if texty {
        format!("\"{}\"", Key::from_bytes(bytes))
    } else {
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!("[{}]", hex.join(" "))
    }
}

/// One line per stored entry, in key order. Package names and scope pointers are
/// raw values; everything else is framed.
pub fn dump(store: &MemoryStore) -> String {
    let mut out = String::new();
    for Entry { key, value } in store.entries() {
        let rendered_key = Key::from_bytes(key.clone()).to_string();
        let raw = key.ends_with(b"\0name") || key.ends_with(b"\0scope") || value.is_empty();
        let rendered_value = if raw {
            render_field(&value)
        } else {
            let parts: Vec<String> = unframe(&value).unwrap().into_iter().map(render_field).collect();
            format!("[{}]", parts.join(", "))
        };
        out.push_str(&format!("{rendered_key} = {rendered_value}\n"));
    }
    out
}

/// A memory store that remembers every batch it was given.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub batches: RefCell<Vec<Vec<Entry>>>,
}

impl KvStore for RecordingStore {
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        self.inner.exists(key)
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()> {
        self.batches.borrow_mut().push(entries.clone());
        self.inner.write_batch(entries)
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }
}

/// A memory store whose next batch write can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_next: Cell<bool>,
}

impl KvStore for FlakyStore {
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        self.inner.exists(key)
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()> {
        if self.fail_next.replace(false) {
            return Err(StoreError::Unavailable("disk on fire".into()));
        }
        self.inner.write_batch(entries)
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }
}
