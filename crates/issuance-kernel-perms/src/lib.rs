//! # Issuance Kernel Permissions
//!
//! Time-locked permissions over a seven-dimensional key space.
//!
//! ## Overview
//!
//! A permission entry says: for this region of `(tokenIds, transferTimes,
//! ownershipTimes, fromList, toList, initiatedByList, approvalIdList)`, these
//! times are permanently permitted and those are permanently forbidden.
//! Entries are ordered and the first matching entry wins.
//!
//! Five families share that shape, each constraining a subset of the
//! dimensions. They are cast into one [`UniversalPermission`] so that a
//! single algorithm validates all of them.
//!
//! ## Key Concepts
//!
//! - **Cuboid**: the region an entry covers ([`CuboidKey`])
//! - **First-match projection**: rewriting entries into disjoint cuboids
//!   ([`first_match_only`])
//! - **Update validation**: a new list may never unlock a time an old list
//!   locked ([`validate_permissions_update`])
//! - **Runtime gates**: whether a permission forbids an action right now
//!   ([`check_action_permission`] and friends)
//!
//! ## Usage
//!
//! ```rust
//! use issuance_kernel_core::{PrefixedHexValidator, UintRange};
//! use issuance_kernel_lists::ListRegistry;
//! use issuance_kernel_perms::{validate_permissions_update, TokenIdsActionPermission};
//! use issuance_kernel_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let validator = PrefixedHexValidator::new("bb");
//! let lists = ListRegistry::new(&store, &validator);
//!
//! let old = vec![TokenIdsActionPermission {
//!     token_ids: vec![UintRange::of(1, 10)],
//!     permanently_permitted_times: vec![UintRange::full()],
//!     permanently_forbidden_times: vec![],
//! }];
//! let mut new = old.clone();
//! new[0].permanently_permitted_times.clear();
//!
//! assert!(validate_permissions_update(&old, &new, &lists).is_err());
//! ```

pub mod approval;
pub mod check;
pub mod error;
pub mod families;
pub mod first_match;
pub mod locator;
pub mod universal;
pub mod update;

pub use approval::{
    approval_matches, validate_collection_approvals, CollectionApproval, ResolvedApproval,
};
pub use check::{
    check_action_permission, check_collection_approval_permission, check_not_forbidden,
    check_token_ids_action_permission,
};
pub use error::{PermsError, Result};
pub use families::{
    cast_all, validate_permissions, validate_permissions_update, ActionPermission,
    CollectionApprovalPermission, PermissionFamily, TokenIdsActionPermission,
    UserIncomingApprovalPermission, UserOutgoingApprovalPermission,
};
pub use first_match::first_match_only;
pub use locator::{PermissionLocator, Violation};
pub use universal::{CuboidKey, PermissionCuboid, UniversalPermission};
pub use update::validate_update;
