//! Staged writes over a base store.
//!
//! A [`StagedStore`] buffers every `put` in memory. Reads see the buffered
//! values first, then the base store. [`StagedStore::commit`] hands all
//! buffered writes to the base store as one batch; dropping the stage
//! without committing discards them.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, StoreError};
use crate::traits::{KvStore, Write};

type Pending = BTreeMap<(String, String), Vec<u8>>;

/// A write buffer layered over `base`.
pub struct StagedStore<'a, S: KvStore + ?Sized> {
    base: &'a S,
    pending: Mutex<Pending>,
}

impl<'a, S: KvStore + ?Sized> StagedStore<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of buffered writes.
    pub fn pending_len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Apply all buffered writes to the base store atomically.
    pub fn commit(self) -> Result<()> {
        let pending = self
            .pending
            .into_inner()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        if pending.is_empty() {
            return Ok(());
        }

        let writes: Vec<Write> = pending
            .into_iter()
            .map(|((namespace, key), value)| Write {
                namespace,
                key,
                value,
            })
            .collect();
        tracing::trace!(writes = writes.len(), "committing staged writes");
        self.base.apply_batch(&writes)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Pending>> {
        self.pending
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl<S: KvStore + ?Sized> KvStore for StagedStore<'_, S> {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self
            .lock()?
            .get(&(namespace.to_string(), key.to_string()))
        {
            return Ok(Some(value.clone()));
        }
        self.base.get(namespace, key)
    }

    fn put(&self, namespace: &str, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?
            .insert((namespace.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }

    fn iterate(&self, namespace: &str, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut merged: BTreeMap<String, Vec<u8>> =
            self.base.iterate(namespace, prefix)?.into_iter().collect();

        let pending = self.lock()?;
        let start = (namespace.to_string(), prefix.to_string());
        for ((_, key), value) in pending
            .range(start..)
            .take_while(|((ns, key), _)| ns == namespace && key.starts_with(prefix))
        {
            merged.insert(key.clone(), value.clone());
        }

        Ok(merged.into_iter().collect())
    }
}
