//! Store trait: the byte-oriented interface the kernel consumes from its host.
//!
//! Records are addressed by `(namespace, key)`. Iteration is ordered by key
//! (bytewise), which every backend must honor so that evaluation stays
//! deterministic across replicas.

use crate::error::{Result, StoreError};

/// Initial value of a counter that has never been incremented.
pub const COUNTER_START: u64 = 1;

/// A single staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub namespace: String,
    pub key: String,
    pub value: Vec<u8>,
}

impl Write {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            value,
        }
    }
}

/// The KvStore trait: synchronous interface for record persistence.
///
/// # Design Notes
///
/// - **Snapshot reads**: reads observe whatever the host exposes; the kernel
///   never caches across calls.
/// - **Ordered iteration**: `iterate` returns `(key, value)` pairs sorted by key.
/// - **Atomic batches**: `apply_batch` either applies every write or none.
///   The default implementation is sequential `put` and is only atomic for
///   backends that cannot fail half-way.
pub trait KvStore: Send + Sync {
    /// Get the value stored under `(namespace, key)`.
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `(namespace, key)`, replacing any previous value.
    fn put(&self, namespace: &str, key: &str, value: &[u8]) -> Result<()>;

    /// All entries of `namespace` whose key starts with `prefix`, ordered by key.
    fn iterate(&self, namespace: &str, prefix: &str) -> Result<Vec<(String, Vec<u8>)>>;

    /// Apply several writes as one unit.
    fn apply_batch(&self, writes: &[Write]) -> Result<()> {
        for write in writes {
            self.put(&write.namespace, &write.key, &write.value)?;
        }
        Ok(())
    }
}

/// Extension trait for common store patterns.
pub trait StoreExt: KvStore {
    /// Check whether a key is present.
    fn has(&self, namespace: &str, key: &str) -> Result<bool>;

    /// Current value of a monotonically increasing counter.
    fn counter(&self, namespace: &str, key: &str) -> Result<u64>;

    /// Increment a counter, returning the value it held before.
    fn increment_counter(&self, namespace: &str, key: &str) -> Result<u64>;
}

impl<S: KvStore + ?Sized> StoreExt for S {
    fn has(&self, namespace: &str, key: &str) -> Result<bool> {
        Ok(self.get(namespace, key)?.is_some())
    }

    fn counter(&self, namespace: &str, key: &str) -> Result<u64> {
        match self.get(namespace, key)? {
            None => Ok(COUNTER_START),
            Some(bytes) => {
                let arr: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::InvalidData(format!(
                        "counter {namespace}/{key} has {} bytes, expected 8",
                        bytes.len()
                    ))
                })?;
                Ok(u64::from_be_bytes(arr))
            }
        }
    }

    fn increment_counter(&self, namespace: &str, key: &str) -> Result<u64> {
        let current = self.counter(namespace, key)?;
        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::InvalidData(format!("counter {namespace}/{key} overflowed"))
        })?;
        self.put(namespace, key, &next.to_be_bytes())?;
        Ok(current)
    }
}
