//! First-match projection.
//!
//! An ordered permission list is read "earliest entry wins". Projection
//! rewrites it into disjoint pieces where each piece of entry `i` covers only
//! the region no earlier entry claimed, so later checks can compare entries
//! pointwise.

use crate::universal::{CuboidKey, PermissionCuboid, UniversalPermission};

/// Project `perms` into pairwise disjoint cuboids, in entry order.
///
/// Entries fully shadowed by earlier ones contribute nothing.
pub fn first_match_only(perms: &[UniversalPermission]) -> Vec<PermissionCuboid> {
    let mut claimed: Vec<CuboidKey> = Vec::with_capacity(perms.len());
    let mut projected = Vec::new();

    for (index, perm) in perms.iter().enumerate() {
        let key = perm.key();
        if key.is_empty() {
            continue;
        }

        let pieces = key.subtract_all(&claimed);
        projected.extend(
            pieces
                .into_iter()
                .map(|piece| perm.cuboid_with_key(piece, index)),
        );
        claimed.push(key);
    }

    tracing::trace!(entries = perms.len(), cuboids = projected.len(), "projected permissions");
    projected
}
