//! Runtime permission gates.
//!
//! At execution time the question is simpler than at update time: does the
//! first-match form of the permission list forbid the requested region right
//! now? Permitted and unhandled times pass.
//!
//! The family-level gates validate their inputs structurally first, so an
//! ill-formed range is reported rather than silently normalized away.

use issuance_kernel_core::range::{self, UintRange};
use issuance_kernel_core::U256;
use issuance_kernel_lists::ListSource;

use crate::approval::{validate_approval_ranges, CollectionApproval, ResolvedApproval};
use crate::error::{PermsError, Result};
use crate::families::{
    cast_all, validate_permissions, ActionPermission, CollectionApprovalPermission,
    TokenIdsActionPermission,
};
use crate::first_match::first_match_only;
use crate::universal::{CuboidKey, UniversalPermission};

/// Fail with `PermissionForbidden` if any projected cuboid overlapping
/// `query` forbids `now`.
pub fn check_not_forbidden(
    perms: &[UniversalPermission],
    query: &CuboidKey,
    now: U256,
) -> Result<()> {
    for cuboid in first_match_only(perms) {
        if range::contains(&cuboid.forbidden, now) && cuboid.key.overlaps(query) {
            tracing::debug!(entry = cuboid.source_index, %now, "action forbidden");
            return Err(PermsError::forbidden(cuboid.source_index, now, &cuboid.forbidden));
        }
    }
    Ok(())
}

pub fn check_action_permission(perms: &[ActionPermission], now: U256) -> Result<()> {
    validate_permissions(perms)?;
    let universal: Vec<_> = perms.iter().map(ActionPermission::to_universal).collect();
    check_not_forbidden(&universal, &CuboidKey::full(), now)
}

pub fn check_token_ids_action_permission(
    perms: &[TokenIdsActionPermission],
    token_ids: &[UintRange],
    now: U256,
) -> Result<()> {
    validate_permissions(perms)?;
    range::validate_ranges(token_ids, "tokenIds")
        .map_err(|e| PermsError::Malformed(format!("queried token ids: {e}")))?;
    let universal: Vec<_> = perms
        .iter()
        .map(TokenIdsActionPermission::to_universal)
        .collect();
    let query = CuboidKey {
        token_ids: range::normalize(token_ids),
        ..CuboidKey::full()
    };
    check_not_forbidden(&universal, &query, now)
}

/// Check whether `approval` may be added, changed or removed at `now`.
pub fn check_collection_approval_permission(
    perms: &[CollectionApprovalPermission],
    approval: &CollectionApproval,
    now: U256,
    lists: &dyn ListSource,
) -> Result<()> {
    validate_permissions(perms)?;
    validate_approval_ranges(approval)?;
    let universal = cast_all(perms, lists)?;
    let query = ResolvedApproval::resolve(approval, lists)?.key();
    check_not_forbidden(&universal, &query, now)
}
