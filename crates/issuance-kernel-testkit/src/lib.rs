//! # Issuance Kernel Testkit
//!
//! Testing utilities for the issuance kernel.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Resolution vectors**: list ids with expected memberships, for
//!   cross-implementation verification
//! - **Generators**: Proptest strategies for range sets, lists and permissions
//! - **Fixtures**: A Keeper over a memory store with named parties
//!
//! ## Resolution Vectors
//!
//! ```rust
//! use issuance_kernel_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, detail) in verify_all_vectors() {
//!     assert!(matches, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use issuance_kernel_perms::validate_update;
//! use issuance_kernel_testkit::generators::universal_permissions;
//!
//! proptest! {
//!     #[test]
//!     fn update_is_reflexive(perms in universal_permissions(4)) {
//!         prop_assert!(validate_update(&perms, &perms).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use issuance_kernel_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.create_whitelist("friends", &[fixture.alice.as_str()]).unwrap();
//! assert!(fixture.keeper.check_addresses("friends", &fixture.alice).unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_addresses, TestFixture};
pub use generators::{
    key_range_set, range_set, time_split, token_ids_permissions, universal_permissions,
};
pub use vectors::{all_vectors, verify_all_vectors, vectors_json, ResolutionVector};
