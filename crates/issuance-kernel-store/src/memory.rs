//! In-memory implementation of the KvStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StoreError};
use crate::traits::{KvStore, Write};

type Entries = BTreeMap<(String, String), Vec<u8>>;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Entries>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all namespaces.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Entries>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let inner = self.read()?;
        Ok(inner
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&self, namespace: &str, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.write()?;
        inner.insert((namespace.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }

    fn iterate(&self, namespace: &str, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let inner = self.read()?;

        // Keys sharing a prefix are contiguous in BTreeMap order.
        let start = (namespace.to_string(), prefix.to_string());
        Ok(inner
            .range(start..)
            .take_while(|((ns, key), _)| ns == namespace && key.starts_with(prefix))
            .map(|((_, key), value)| (key.clone(), value.clone()))
            .collect())
    }

    fn apply_batch(&self, writes: &[Write]) -> Result<()> {
        let mut inner = self.write()?;
        for write in writes {
            inner.insert(
                (write.namespace.clone(), write.key.clone()),
                write.value.clone(),
            );
        }
        Ok(())
    }
}
