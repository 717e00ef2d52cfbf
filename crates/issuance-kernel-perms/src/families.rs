//! Concrete permission families and their casts to the universal shape.
//!
//! Each family names the dimensions it constrains; the cast resolves list-id
//! fields (tracker mode for approval ids, address-list mode otherwise) and
//! sets the matching `uses_*` flags. Structural validation is shared.

use std::collections::HashMap;

use issuance_kernel_core::range::{self, UintRange};
use issuance_kernel_lists::ListSource;
use serde::{Deserialize, Serialize};

use crate::error::{PermsError, Result};
use crate::universal::UniversalPermission;
use crate::update::validate_update;

/// A permission family that casts to [`UniversalPermission`].
pub trait PermissionFamily {
    /// Family name used in error messages.
    const FAMILY: &'static str;

    fn permitted_times(&self) -> &[UintRange];

    fn forbidden_times(&self) -> &[UintRange];

    /// Range-valued key dimensions, by field name.
    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])>;

    /// List-id key dimensions, by field name.
    fn list_ids(&self) -> Vec<(&'static str, &str)>;

    /// Resolve list ids and lift into the universal shape.
    fn cast(&self, lists: &dyn ListSource) -> Result<UniversalPermission>;
}

/// Gates an action by time alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionPermission {
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl ActionPermission {
    pub fn to_universal(&self) -> UniversalPermission {
        UniversalPermission::with_times(
            self.permanently_permitted_times.clone(),
            self.permanently_forbidden_times.clone(),
        )
    }
}

impl PermissionFamily for ActionPermission {
    const FAMILY: &'static str = "ActionPermission";

    fn permitted_times(&self) -> &[UintRange] {
        &self.permanently_permitted_times
    }

    fn forbidden_times(&self) -> &[UintRange] {
        &self.permanently_forbidden_times
    }

    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])> {
        Vec::new()
    }

    fn list_ids(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    fn cast(&self, _lists: &dyn ListSource) -> Result<UniversalPermission> {
        Ok(self.to_universal())
    }
}

/// Gates an action on a set of token ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenIdsActionPermission {
    pub token_ids: Vec<UintRange>,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl TokenIdsActionPermission {
    pub fn to_universal(&self) -> UniversalPermission {
        UniversalPermission {
            token_ids: self.token_ids.clone(),
            uses_token_ids: true,
            ..UniversalPermission::with_times(
                self.permanently_permitted_times.clone(),
                self.permanently_forbidden_times.clone(),
            )
        }
    }
}

impl PermissionFamily for TokenIdsActionPermission {
    const FAMILY: &'static str = "TokenIdsActionPermission";

    fn permitted_times(&self) -> &[UintRange] {
        &self.permanently_permitted_times
    }

    fn forbidden_times(&self) -> &[UintRange] {
        &self.permanently_forbidden_times
    }

    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])> {
        vec![("tokenIds", &self.token_ids)]
    }

    fn list_ids(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    fn cast(&self, _lists: &dyn ListSource) -> Result<UniversalPermission> {
        Ok(self.to_universal())
    }
}

/// Gates updates to collection-level approvals. Uses every dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionApprovalPermission {
    pub from_list_id: String,
    pub to_list_id: String,
    pub initiated_by_list_id: String,
    pub transfer_times: Vec<UintRange>,
    pub token_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id: String,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionFamily for CollectionApprovalPermission {
    const FAMILY: &'static str = "CollectionApprovalPermission";

    fn permitted_times(&self) -> &[UintRange] {
        &self.permanently_permitted_times
    }

    fn forbidden_times(&self) -> &[UintRange] {
        &self.permanently_forbidden_times
    }

    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])> {
        vec![
            ("transferTimes", &self.transfer_times),
            ("tokenIds", &self.token_ids),
            ("ownershipTimes", &self.ownership_times),
        ]
    }

    fn list_ids(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("fromListId", &self.from_list_id),
            ("toListId", &self.to_list_id),
            ("initiatedByListId", &self.initiated_by_list_id),
            ("approvalId", &self.approval_id),
        ]
    }

    fn cast(&self, lists: &dyn ListSource) -> Result<UniversalPermission> {
        Ok(UniversalPermission {
            from_list: lists.address_list(&self.from_list_id)?,
            uses_from_list: true,
            to_list: lists.address_list(&self.to_list_id)?,
            uses_to_list: true,
            ..approval_dimensions(
                &self.initiated_by_list_id,
                &self.approval_id,
                [&self.transfer_times, &self.token_ids, &self.ownership_times],
                lists,
                times(self),
            )?
        })
    }
}

/// Gates updates to a user's incoming approvals. The recipient is implied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserIncomingApprovalPermission {
    pub from_list_id: String,
    pub initiated_by_list_id: String,
    pub transfer_times: Vec<UintRange>,
    pub token_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id: String,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionFamily for UserIncomingApprovalPermission {
    const FAMILY: &'static str = "UserIncomingApprovalPermission";

    fn permitted_times(&self) -> &[UintRange] {
        &self.permanently_permitted_times
    }

    fn forbidden_times(&self) -> &[UintRange] {
        &self.permanently_forbidden_times
    }

    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])> {
        vec![
            ("transferTimes", &self.transfer_times),
            ("tokenIds", &self.token_ids),
            ("ownershipTimes", &self.ownership_times),
        ]
    }

    fn list_ids(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("fromListId", &self.from_list_id),
            ("initiatedByListId", &self.initiated_by_list_id),
            ("approvalId", &self.approval_id),
        ]
    }

    fn cast(&self, lists: &dyn ListSource) -> Result<UniversalPermission> {
        Ok(UniversalPermission {
            from_list: lists.address_list(&self.from_list_id)?,
            uses_from_list: true,
            ..approval_dimensions(
                &self.initiated_by_list_id,
                &self.approval_id,
                [&self.transfer_times, &self.token_ids, &self.ownership_times],
                lists,
                times(self),
            )?
        })
    }
}

/// Gates updates to a user's outgoing approvals. The sender is implied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserOutgoingApprovalPermission {
    pub to_list_id: String,
    pub initiated_by_list_id: String,
    pub transfer_times: Vec<UintRange>,
    pub token_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub approval_id: String,
    pub permanently_permitted_times: Vec<UintRange>,
    pub permanently_forbidden_times: Vec<UintRange>,
}

impl PermissionFamily for UserOutgoingApprovalPermission {
    const FAMILY: &'static str = "UserOutgoingApprovalPermission";

    fn permitted_times(&self) -> &[UintRange] {
        &self.permanently_permitted_times
    }

    fn forbidden_times(&self) -> &[UintRange] {
        &self.permanently_forbidden_times
    }

    fn key_ranges(&self) -> Vec<(&'static str, &[UintRange])> {
        vec![
            ("transferTimes", &self.transfer_times),
            ("tokenIds", &self.token_ids),
            ("ownershipTimes", &self.ownership_times),
        ]
    }

    fn list_ids(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("toListId", &self.to_list_id),
            ("initiatedByListId", &self.initiated_by_list_id),
            ("approvalId", &self.approval_id),
        ]
    }

    fn cast(&self, lists: &dyn ListSource) -> Result<UniversalPermission> {
        Ok(UniversalPermission {
            to_list: lists.address_list(&self.to_list_id)?,
            uses_to_list: true,
            ..approval_dimensions(
                &self.initiated_by_list_id,
                &self.approval_id,
                [&self.transfer_times, &self.token_ids, &self.ownership_times],
                lists,
                times(self),
            )?
        })
    }
}

fn times<P: PermissionFamily>(perm: &P) -> (Vec<UintRange>, Vec<UintRange>) {
    (perm.permitted_times().to_vec(), perm.forbidden_times().to_vec())
}

/// Dimensions shared by the three approval families.
fn approval_dimensions(
    initiated_by_list_id: &str,
    approval_id: &str,
    [transfer_times, token_ids, ownership_times]: [&[UintRange]; 3],
    lists: &dyn ListSource,
    (permitted, forbidden): (Vec<UintRange>, Vec<UintRange>),
) -> Result<UniversalPermission> {
    Ok(UniversalPermission {
        transfer_times: transfer_times.to_vec(),
        uses_transfer_times: true,
        token_ids: token_ids.to_vec(),
        uses_token_ids: true,
        ownership_times: ownership_times.to_vec(),
        uses_ownership_times: true,
        initiated_by_list: lists.address_list(initiated_by_list_id)?,
        uses_initiated_by_list: true,
        approval_id_list: lists.tracker_list(approval_id)?,
        uses_approval_id_list: true,
        ..UniversalPermission::with_times(permitted, forbidden)
    })
}

/// Structural validation of one family's permission list.
///
/// Checks every entry for missing list ids, empty key range sets, ill-formed
/// or overlapping ranges and times that are both permitted and forbidden,
/// then rejects entries whose keys repeat an earlier entry exactly.
pub fn validate_permissions<P: PermissionFamily>(perms: &[P]) -> Result<()> {
    let mut seen: HashMap<(Vec<Vec<UintRange>>, Vec<&str>), usize> = HashMap::new();

    for (index, perm) in perms.iter().enumerate() {
        let malformed = |detail: String| {
            PermsError::Malformed(format!("{} entry {index}: {detail}", P::FAMILY))
        };

        let list_ids = perm.list_ids();
        if let Some((field, _)) = list_ids.iter().find(|(_, id)| id.is_empty()) {
            return Err(PermsError::InvalidRequest(format!(
                "{} entry {index}: missing {field}",
                P::FAMILY
            )));
        }

        let key_ranges = perm.key_ranges();
        for (field, ranges) in &key_ranges {
            if ranges.is_empty() {
                return Err(malformed(format!("{field} is empty")));
            }
            range::validate_ranges(ranges, field).map_err(|e| malformed(e.to_string()))?;
        }
        range::validate_ranges(perm.permitted_times(), "permanentlyPermittedTimes")
            .map_err(|e| malformed(e.to_string()))?;
        range::validate_ranges(perm.forbidden_times(), "permanentlyForbiddenTimes")
            .map_err(|e| malformed(e.to_string()))?;

        let both = range::intersect(perm.permitted_times(), perm.forbidden_times());
        if !both.is_empty() {
            return Err(malformed(format!(
                "times {} are both permitted and forbidden",
                range::display_ranges(&both)
            )));
        }

        let key = (
            key_ranges
                .iter()
                .map(|(_, ranges)| range::normalize(ranges))
                .collect(),
            list_ids.iter().map(|(_, id)| *id).collect(),
        );
        if let Some(first) = seen.insert(key, index) {
            return Err(malformed(format!("duplicate of entry {first}")));
        }
    }

    Ok(())
}

/// Cast every entry, resolving list ids through `lists`.
pub fn cast_all<P: PermissionFamily>(
    perms: &[P],
    lists: &dyn ListSource,
) -> Result<Vec<UniversalPermission>> {
    perms.iter().map(|perm| perm.cast(lists)).collect()
}

/// Validate both lists structurally, cast them, and check the transition.
pub fn validate_permissions_update<P: PermissionFamily>(
    old: &[P],
    new: &[P],
    lists: &dyn ListSource,
) -> Result<()> {
    validate_permissions(old)?;
    validate_permissions(new)?;

    let old = cast_all(old, lists)?;
    let new = cast_all(new, lists)?;

    validate_update(&old, &new).map_err(|e| {
        tracing::debug!(family = P::FAMILY, error = %e, "rejected permission update");
        e
    })
}
