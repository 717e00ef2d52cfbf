//! # Issuance Kernel
//!
//! Address lists and time-locked transfer permissions for a token-issuance
//! module.
//!
//! ## Overview
//!
//! The kernel answers two questions for a transaction handler:
//!
//! - **Who**: is this address a member of that list? Lists are stored, reserved
//!   (`Mint`, `All`, `None`, `AllWithout...`), written inline as
//!   `addr1:addr2`, or inversions of any of these (`!x`, `!(x)`).
//! - **When**: may this permission list be replaced by that one? A time a
//!   permission once locked as permitted or forbidden must stay locked.
//!
//! All state lives in an injected [`KvStore`](store::KvStore). The kernel is
//! deterministic: equal inputs and store contents give equal results and
//! equal error codes.
//!
//! ## Usage
//!
//! ```rust
//! use issuance_kernel::{AddressList, Keeper, KeeperConfig};
//! use issuance_kernel::store::MemoryStore;
//!
//! let keeper = Keeper::new(MemoryStore::new(), KeeperConfig::default());
//!
//! let alice = format!("bb{}", "a".repeat(40));
//! keeper
//!     .create_address_list(&AddressList::whitelist("friends", vec![alice.clone()]))
//!     .unwrap();
//!
//! assert!(keeper.check_addresses("friends", &alice).unwrap());
//! assert!(!keeper.check_addresses("!(friends)", &alice).unwrap());
//! assert!(keeper.check_addresses("AllWithoutMint", &alice).unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `issuance_kernel::core` - Ranges, addresses, error kinds
//! - `issuance_kernel::store` - Storage abstraction, memory and SQLite stores
//! - `issuance_kernel::lists` - Address lists and list-id resolution
//! - `issuance_kernel::perms` - Universal permissions and update validation

pub mod config;
pub mod error;
pub mod keeper;

// Re-export component crates
pub use issuance_kernel_core as core;
pub use issuance_kernel_lists as lists;
pub use issuance_kernel_perms as perms;
pub use issuance_kernel_store as store;

// Re-export main types for convenience
pub use config::KeeperConfig;
pub use error::{KernelError, Result};
pub use keeper::Keeper;

pub use issuance_kernel_core::{ErrorKind, UintRange, MINT_ADDRESS, U256};
pub use issuance_kernel_lists::AddressList;
pub use issuance_kernel_perms::{
    ActionPermission, CollectionApproval, CollectionApprovalPermission, PermissionLocator,
    TokenIdsActionPermission, UserIncomingApprovalPermission, UserOutgoingApprovalPermission,
};
