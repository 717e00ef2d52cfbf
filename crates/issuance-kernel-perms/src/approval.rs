//! Collection approvals: write-time validation and transfer matching.

use std::collections::HashSet;

use issuance_kernel_core::range::{self, UintRange};
use issuance_kernel_core::MINT_ADDRESS;
use issuance_kernel_lists::{is_reserved_id, AddressList, ListSource, TransferLists};
use serde::{Deserialize, Serialize};

use crate::error::{PermsError, Result};
use crate::universal::CuboidKey;

/// A collection-level transfer approval, with list fields as ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionApproval {
    pub approval_id: String,
    pub from_list_id: String,
    pub to_list_id: String,
    pub initiated_by_list_id: String,
    pub transfer_times: Vec<UintRange>,
    pub token_ids: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub uri: String,
    pub custom_data: String,
}

/// An approval with its lists resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApproval {
    pub approval: CollectionApproval,
    pub from_list: AddressList,
    pub to_list: AddressList,
    pub initiated_by_list: AddressList,
}

impl ResolvedApproval {
    pub fn resolve(approval: &CollectionApproval, lists: &dyn ListSource) -> Result<Self> {
        Ok(Self {
            from_list: lists.address_list(&approval.from_list_id)?,
            to_list: lists.address_list(&approval.to_list_id)?,
            initiated_by_list: lists.address_list(&approval.initiated_by_list_id)?,
            approval: approval.clone(),
        })
    }

    pub fn lists(&self) -> TransferLists<'_> {
        TransferLists {
            from: &self.from_list,
            to: &self.to_list,
            initiated_by: &self.initiated_by_list,
        }
    }

    /// The region of the permission key space this approval occupies.
    pub fn key(&self) -> CuboidKey {
        let id = &self.approval.approval_id;
        CuboidKey {
            token_ids: range::normalize(&self.approval.token_ids),
            transfer_times: range::normalize(&self.approval.transfer_times),
            ownership_times: range::normalize(&self.approval.ownership_times),
            from: self.from_list.clone(),
            to: self.to_list.clone(),
            initiated_by: self.initiated_by_list.clone(),
            approval_ids: AddressList::whitelist(id.as_str(), vec![id.clone()]),
        }
    }
}

/// True iff `from`, `to` and `initiated_by` are members of the approval's lists.
pub fn approval_matches(
    from: &str,
    to: &str,
    initiated_by: &str,
    approval: &ResolvedApproval,
) -> bool {
    approval.lists().matches(from, to, initiated_by)
}

/// Validate a collection's approvals and resolve their lists.
///
/// Approval ids must be present, unique and usable as tracker aliases. Range
/// sets must be non-empty, well-formed and non-overlapping. A from-list may hold the mint
/// sentinel only on its own.
pub fn validate_collection_approvals(
    approvals: &[CollectionApproval],
    lists: &dyn ListSource,
) -> Result<Vec<ResolvedApproval>> {
    let mut ids = HashSet::with_capacity(approvals.len());
    let mut resolved = Vec::with_capacity(approvals.len());

    for approval in approvals {
        let id = approval.approval_id.as_str();
        validate_approval_id(id)?;
        if !ids.insert(id) {
            return Err(PermsError::InvalidRequest(format!("duplicate approval id {id:?}")));
        }

        validate_approval_ranges(approval)?;

        let approval = ResolvedApproval::resolve(approval, lists)?;
        let from = &approval.from_list.addresses;
        if from.len() > 1 && from.iter().any(|a| a == MINT_ADDRESS) {
            tracing::debug!(approval_id = id, list_id = %approval.approval.from_list_id, "mint mixed");
            return Err(PermsError::MintMixed {
                approval_id: id.to_string(),
                list_id: approval.approval.from_list_id.clone(),
            });
        }
        resolved.push(approval);
    }

    Ok(resolved)
}

/// Every range set of `approval` must be non-empty, well-formed and
/// non-overlapping.
pub(crate) fn validate_approval_ranges(approval: &CollectionApproval) -> Result<()> {
    let id = &approval.approval_id;
    for (field, ranges) in [
        ("transferTimes", &approval.transfer_times),
        ("tokenIds", &approval.token_ids),
        ("ownershipTimes", &approval.ownership_times),
    ] {
        if ranges.is_empty() {
            return Err(PermsError::Malformed(format!("approval {id:?}: {field} is empty")));
        }
        range::validate_ranges(ranges, field)
            .map_err(|e| PermsError::Malformed(format!("approval {id:?}: {e}")))?;
    }
    Ok(())
}

fn validate_approval_id(id: &str) -> Result<()> {
    let invalid = |reason: &str| PermsError::InvalidApprovalId {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.is_empty() {
        return Err(PermsError::InvalidRequest("missing approval id".to_string()));
    }
    if id.contains(':') || id.contains('!') {
        return Err(invalid("':' and '!' are not allowed"));
    }
    if is_reserved_id(id) {
        return Err(invalid("reserved word"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuance_kernel_core::{ErrorKind, PrefixedHexValidator};
    use issuance_kernel_lists::ListRegistry;
    use issuance_kernel_store::MemoryStore;

    fn addr(c: char) -> String {
        format!("bb{}", c.to_string().repeat(40))
    }

    fn approval(id: &str, from: &str) -> CollectionApproval {
        CollectionApproval {
            approval_id: id.to_string(),
            from_list_id: from.to_string(),
            to_list_id: "All".to_string(),
            initiated_by_list_id: "All".to_string(),
            transfer_times: vec![UintRange::full()],
            token_ids: vec![UintRange::of(1, 100)],
            ownership_times: vec![UintRange::full()],
            ..Default::default()
        }
    }

    #[test]
    fn test_mint_mixed() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);
        registry
            .create_address_list(&AddressList::whitelist(
                "mintAndAlice",
                vec![MINT_ADDRESS.to_string(), addr('a')],
            ))
            .unwrap();

        let err = validate_collection_approvals(&[approval("a1", "mintAndAlice")], &registry)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MintMixed);

        assert!(validate_collection_approvals(&[approval("a1", "Mint")], &registry).is_ok());
        assert!(validate_collection_approvals(&[approval("a1", "!Mint")], &registry).is_ok());
    }

    #[test]
    fn test_approval_id_rules() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);
        let kind = |approvals: &[CollectionApproval]| {
            validate_collection_approvals(approvals, &registry)
                .unwrap_err()
                .kind()
        };

        assert_eq!(kind(&[approval("", "All")]), ErrorKind::InvalidRequest);
        assert_eq!(kind(&[approval("a:b", "All")]), ErrorKind::InvalidId);
        assert_eq!(kind(&[approval("!a", "All")]), ErrorKind::InvalidId);
        assert_eq!(kind(&[approval("All", "All")]), ErrorKind::InvalidId);
        assert_eq!(
            kind(&[approval("a1", "All"), approval("a1", "None")]),
            ErrorKind::InvalidRequest
        );
        assert_eq!(kind(&[approval("a1", "unknown")]), ErrorKind::NotFound);

        let mut bad_range = approval("a1", "All");
        bad_range.token_ids = vec![UintRange::of(9, 1)];
        assert_eq!(kind(&[bad_range]), ErrorKind::PermissionMalformed);
    }

    #[test]
    fn test_empty_range_sets_are_malformed() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        let mut empty = approval("a1", "All");
        empty.transfer_times.clear();
        empty.token_ids.clear();
        empty.ownership_times.clear();
        let err = validate_collection_approvals(&[empty], &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionMalformed);

        let mut no_tokens = approval("a1", "All");
        no_tokens.token_ids.clear();
        let err = validate_collection_approvals(&[no_tokens], &registry).unwrap_err();
        assert!(err.to_string().contains("tokenIds is empty"));
    }

    #[test]
    fn test_matches() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        let mut inline = approval("a1", "Mint");
        inline.to_list_id = format!("{}:{}", addr('a'), addr('b'));
        let resolved = validate_collection_approvals(&[inline], &registry).unwrap();

        assert!(approval_matches(MINT_ADDRESS, &addr('a'), &addr('c'), &resolved[0]));
        assert!(!approval_matches(MINT_ADDRESS, &addr('c'), &addr('c'), &resolved[0]));
        assert!(!approval_matches(&addr('a'), &addr('a'), &addr('c'), &resolved[0]));
    }
}
