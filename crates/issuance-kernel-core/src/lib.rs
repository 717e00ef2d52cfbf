//! # Issuance Kernel Core
//!
//! Pure primitives for the issuance kernel: range algebra, address syntax,
//! account keys and canonical encoding.
//!
//! This crate contains no I/O and no storage.
//!
//! ## Key Types
//!
//! - [`UintRange`] - A closed interval over unsigned 256-bit integers
//! - [`AddressValidator`] - The injected address syntax check
//! - [`ErrorKind`] - The closed set of domain error kinds
//!
//! ## Range Algebra
//!
//! Token ids and times are sets of ranges. See the [`range`] module for the
//! normalized set operations (union, intersection, difference, subset).

pub mod address;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod range;

pub use address::{derive_address, AddressValidator, PrefixedHexValidator, MINT_ADDRESS};
pub use canonical::{from_canonical_bytes, to_canonical_bytes};
pub use crypto::{Blake3Hash, Ed25519PublicKey, Keypair};
pub use error::{CoreError, ErrorKind, Result};
pub use range::UintRange;

pub use alloy_primitives::U256;
