//! SQLite-backed store: a single `kv` table clustered on its key, so rows are kept
//! in key order like any sorted key-value store.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{Entry, KvStore, StoreError, StoreResult};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) a store at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> StoreResult<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        log::debug!("opening SQLite store at {}", db_path.display());
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// An in-memory SQLite store, for tests.
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key BLOB PRIMARY KEY NOT NULL,
                value BLOB NOT NULL
            ) WITHOUT ROWID",
            [],
        )?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    /// Flushes and closes the underlying connection.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .into_inner()
            .close()
            .map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

impl KvStore for SqliteStore {
    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn write_batch(&self, entries: Vec<Entry>) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)")?;
            for entry in &entries {
                stmt.execute(params![entry.key, entry.value])?;
            }
        }
        tx.commit()?;
        log::debug!("SQLite store: committed batch of {} entries", entries.len());
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .write_batch(vec![Entry::new("k\0name", "p"), Entry::new("k\0imports/y", "")])
            .unwrap();
        assert!(store.exists(b"k\0name").unwrap());
        assert!(!store.exists(b"k").unwrap());
        assert_eq!(store.get(b"k\0name").unwrap(), Some(b"p".to_vec()));
        assert_eq!(store.get(b"k\0imports/y").unwrap(), Some(Vec::new()));
        assert_eq!(store.len().unwrap(), 2);
    }
}
