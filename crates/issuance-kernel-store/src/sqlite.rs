//! SQLite implementation of the KvStore trait.
//!
//! This is the persistent backend. It uses rusqlite with bundled SQLite;
//! every record lives in a single `kv` table keyed by `(namespace, key)`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{KvStore, Write};

const UPSERT: &str = "INSERT INTO kv (namespace, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening sqlite store");
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl KvStore for SqliteStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, namespace: &str, key: &str, value: &[u8]) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(UPSERT, params![namespace, key, value, now_millis()])?;
        Ok(())
    }

    fn iterate(&self, namespace: &str, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT key, value FROM kv
             WHERE namespace = ?1 AND substr(key, 1, length(?2)) = ?2
             ORDER BY key",
        )?;
        let rows = stmt
            .query_map(params![namespace, prefix], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn apply_batch(&self, writes: &[Write]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = now_millis();
        for write in writes {
            tx.execute(
                UPSERT,
                params![write.namespace, write.key, write.value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;

    #[test]
    fn test_sqlite_get_put() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.get("lists", "a").unwrap(), None);

        store.put("lists", "a", b"one").unwrap();
        store.put("lists", "a", b"two").unwrap();
        assert_eq!(store.get("lists", "a").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn test_sqlite_iterate_matches_memory_order() {
        let store = SqliteStore::open_memory().unwrap();
        for key in ["b", "aB", "ab", "a", "Z"] {
            store.put("lists", key, key.as_bytes()).unwrap();
        }
        store.put("other", "a", b"x").unwrap();

        let keys: Vec<String> = store
            .iterate("lists", "a")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a", "aB", "ab"]);

        let all: Vec<String> = store
            .iterate("lists", "")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(all, vec!["Z", "a", "aB", "ab", "b"]);
    }

    #[test]
    fn test_sqlite_batch_and_counter() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .apply_batch(&[
                Write::new("lists", "x", b"1".to_vec()),
                Write::new("params", "next", 7u64.to_be_bytes().to_vec()),
            ])
            .unwrap();

        assert!(store.has("lists", "x").unwrap());
        assert_eq!(store.increment_counter("params", "next").unwrap(), 7);
        assert_eq!(store.counter("params", "next").unwrap(), 8);
    }

    #[test]
    fn test_sqlite_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kernel.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put("lists", "kept", b"v").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("lists", "kept").unwrap(), Some(b"v".to_vec()));
    }
}
