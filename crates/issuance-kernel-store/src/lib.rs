//! # Issuance Kernel Store
//!
//! Storage abstraction for the issuance kernel. The kernel never owns its
//! persistence: the host injects a [`KvStore`], a byte-oriented store keyed by
//! `(namespace, key)`.
//!
//! ## Key Types
//!
//! - [`KvStore`] - The trait for all storage operations
//! - [`StoreExt`] - Presence checks and monotonic counters on any store
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`StagedStore`] - Buffered writes committed as one batch
//!
//! ## Usage
//!
//! ```rust,no_run
//! use issuance_kernel_store::{KvStore, SqliteStore, StagedStore, StoreExt};
//!
//! let store = SqliteStore::open("kernel.db").unwrap();
//!
//! let staged = StagedStore::new(&store);
//! staged.put("addressLists", "friends", b"...").unwrap();
//! staged.increment_counter("params", "nextAddressListId").unwrap();
//! staged.commit().unwrap();
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod staged;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use staged::StagedStore;
pub use traits::{KvStore, StoreExt, Write, COUNTER_START};
