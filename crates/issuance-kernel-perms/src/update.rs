//! Permission update validation.
//!
//! Once a time is locked (permanently permitted or permanently forbidden) for
//! a region of the key space, every later version of the permission list
//! must keep it locked the same way. Unhandled times are free.

use issuance_kernel_core::{range, UintRange};

use crate::error::{PermsError, Result};
use crate::first_match::first_match_only;
use crate::locator::{PermissionLocator, Violation};
use crate::universal::{CuboidKey, PermissionCuboid, UniversalPermission};

/// Check that `new` keeps every time `old` locked.
///
/// Both lists are projected to first-match form. Overlapping pairs are
/// compared first, in `(old, new)` index order; then every locked old region
/// must still be covered by some new entry. The first violation is reported.
pub fn validate_update(old: &[UniversalPermission], new: &[UniversalPermission]) -> Result<()> {
    let old = first_match_only(old);
    let new = first_match_only(new);

    for o in &old {
        for n in &new {
            let Some(common) = o.key.intersect(&n.key) else {
                continue;
            };

            let lost = range::subtract(&o.permitted, &n.permitted);
            if !lost.is_empty() {
                return Err(weakens(o, Some(n), common, lost, Violation::NoLongerPermitted));
            }

            let lost = range::subtract(&o.forbidden, &n.forbidden);
            if !lost.is_empty() {
                return Err(weakens(o, Some(n), common, lost, Violation::NoLongerForbidden));
            }
        }
    }

    for o in old.iter().filter(|o| !o.is_unhandled()) {
        let uncovered = o.key.subtract_all(new.iter().map(|n| &n.key));
        if let Some(region) = uncovered.into_iter().next() {
            return Err(weakens(o, None, region, o.locked_times(), Violation::Uncovered));
        }
    }

    Ok(())
}

fn weakens(
    old: &PermissionCuboid,
    new: Option<&PermissionCuboid>,
    key: CuboidKey,
    times: Vec<UintRange>,
    violation: Violation,
) -> PermsError {
    let locator = PermissionLocator {
        old_index: old.source_index,
        new_index: new.map(|n| n.source_index),
        key,
        times,
        violation,
    };
    tracing::debug!(%locator, "permission update weakens a locked time");
    PermsError::Weakens(Box::new(locator))
}
