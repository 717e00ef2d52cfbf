//! # Issuance Kernel Lists
//!
//! Address lists: the predicates that gate who may send, receive or initiate
//! a transfer.
//!
//! ## List Ids
//!
//! A list id is not just a storage key. It may be:
//!
//! - a stored list (`friends`)
//! - a reserved id (`Mint`, `All`, `AllWithMint`, `None`, `AllWithout<a>:<b>`)
//! - an inline whitelist of addresses joined by `:`
//! - any of the above inverted with `!x` or `!(x)`
//!
//! [`ListExpr`] parses an id into that shape; [`ListRegistry`] evaluates it
//! against a host store and returns a resolved [`AddressList`].
//!
//! ## Usage
//!
//! ```rust
//! use issuance_kernel_core::PrefixedHexValidator;
//! use issuance_kernel_lists::{AddressList, ListRegistry};
//! use issuance_kernel_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let validator = PrefixedHexValidator::new("bb");
//! let registry = ListRegistry::new(&store, &validator);
//!
//! let alice = format!("bb{}", "a".repeat(40));
//! registry
//!     .create_address_list(&AddressList::whitelist("friends", vec![alice.clone()]))
//!     .unwrap();
//!
//! assert!(registry.check_address("friends", &alice).unwrap());
//! assert!(!registry.check_address("!friends", &alice).unwrap());
//! ```

pub mod error;
pub mod expr;
pub mod list;
pub mod membership;
pub mod ops;
pub mod registry;

pub use error::{ListError, Result};
pub use expr::{is_reserved_id, ListExpr, ReservedList, ResolveMode};
pub use list::{validate_addresses, validate_stored_id, AddressList};
pub use membership::{check_address, TransferLists};
pub use registry::{
    ListRegistry, ListSource, Namespaces, ADDRESS_LISTS_NAMESPACE, NEXT_ADDRESS_LIST_ID_KEY,
    PARAMS_NAMESPACE,
};
