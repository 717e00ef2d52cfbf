//! The universal permission shape and its cuboid algebra.
//!
//! Every permission family is cast into a [`UniversalPermission`]. Its key is
//! a cuboid over seven dimensions: three range sets and four resolved lists.
//! Dimensions a family does not use span their whole universe.

use bytes::Bytes;
use issuance_kernel_core::range::{self, UintRange};
use issuance_kernel_lists::{ops, AddressList};
use serde::{Deserialize, Serialize};

/// A permission in the merged shape shared by all families.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UniversalPermission {
    pub token_ids: Vec<UintRange>,
    pub transfer_times: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub from_list: AddressList,
    pub to_list: AddressList,
    pub initiated_by_list: AddressList,
    pub approval_id_list: AddressList,

    pub uses_token_ids: bool,
    pub uses_transfer_times: bool,
    pub uses_ownership_times: bool,
    pub uses_from_list: bool,
    pub uses_to_list: bool,
    pub uses_initiated_by_list: bool,
    pub uses_approval_id_list: bool,

    /// Times during which the permission is locked to permitted.
    pub permanently_permitted_times: Vec<UintRange>,
    /// Times during which the permission is locked to forbidden.
    pub permanently_forbidden_times: Vec<UintRange>,

    /// Opaque caller payload, carried through projection untouched.
    pub arbitrary_value: Option<Bytes>,
}

impl UniversalPermission {
    /// A permission that only states times.
    pub fn with_times(permitted: Vec<UintRange>, forbidden: Vec<UintRange>) -> Self {
        Self {
            permanently_permitted_times: permitted,
            permanently_forbidden_times: forbidden,
            ..Self::default()
        }
    }

    /// The cuboid this permission covers.
    pub fn key(&self) -> CuboidKey {
        let ranges = |used: bool, ranges: &[UintRange]| {
            if used {
                range::normalize(ranges)
            } else {
                vec![UintRange::full()]
            }
        };
        let list = |used: bool, list: &AddressList| {
            if used {
                list.clone()
            } else {
                AddressList::all()
            }
        };

        CuboidKey {
            token_ids: ranges(self.uses_token_ids, &self.token_ids),
            transfer_times: ranges(self.uses_transfer_times, &self.transfer_times),
            ownership_times: ranges(self.uses_ownership_times, &self.ownership_times),
            from: list(self.uses_from_list, &self.from_list),
            to: list(self.uses_to_list, &self.to_list),
            initiated_by: list(self.uses_initiated_by_list, &self.initiated_by_list),
            approval_ids: list(self.uses_approval_id_list, &self.approval_id_list),
        }
    }

    /// This permission as a cuboid tagged with its position in the input.
    pub fn to_cuboid(&self, source_index: usize) -> PermissionCuboid {
        self.cuboid_with_key(self.key(), source_index)
    }

    pub(crate) fn cuboid_with_key(&self, key: CuboidKey, source_index: usize) -> PermissionCuboid {
        PermissionCuboid {
            key,
            permitted: range::normalize(&self.permanently_permitted_times),
            forbidden: range::normalize(&self.permanently_forbidden_times),
            arbitrary_value: self.arbitrary_value.clone(),
            source_index,
        }
    }
}

/// A region of the seven-dimensional key space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidKey {
    pub token_ids: Vec<UintRange>,
    pub transfer_times: Vec<UintRange>,
    pub ownership_times: Vec<UintRange>,
    pub from: AddressList,
    pub to: AddressList,
    pub initiated_by: AddressList,
    pub approval_ids: AddressList,
}

impl CuboidKey {
    /// The whole key space.
    pub fn full() -> Self {
        Self {
            token_ids: vec![UintRange::full()],
            transfer_times: vec![UintRange::full()],
            ownership_times: vec![UintRange::full()],
            from: AddressList::all(),
            to: AddressList::all(),
            initiated_by: AddressList::all(),
            approval_ids: AddressList::all(),
        }
    }

    /// True iff any dimension is empty.
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
            || self.transfer_times.is_empty()
            || self.ownership_times.is_empty()
            || self.from.is_empty()
            || self.to.is_empty()
            || self.initiated_by.is_empty()
            || self.approval_ids.is_empty()
    }

    /// The common region, or `None` when the cuboids are disjoint.
    pub fn intersect(&self, other: &CuboidKey) -> Option<CuboidKey> {
        let common = CuboidKey {
            token_ids: range::intersect(&self.token_ids, &other.token_ids),
            transfer_times: range::intersect(&self.transfer_times, &other.transfer_times),
            ownership_times: range::intersect(&self.ownership_times, &other.ownership_times),
            from: ops::intersect(&self.from, &other.from),
            to: ops::intersect(&self.to, &other.to),
            initiated_by: ops::intersect(&self.initiated_by, &other.initiated_by),
            approval_ids: ops::intersect(&self.approval_ids, &other.approval_ids),
        };
        (!common.is_empty()).then_some(common)
    }

    pub fn overlaps(&self, other: &CuboidKey) -> bool {
        self.intersect(other).is_some()
    }

    /// `self` minus `other` as pairwise disjoint, non-empty cuboids.
    ///
    /// Dimensions are narrowed one at a time: each piece takes the part of
    /// one dimension outside `other` while every earlier dimension is already
    /// clamped to the intersection.
    pub fn subtract(&self, other: &CuboidKey) -> Vec<CuboidKey> {
        if self.is_empty() {
            return Vec::new();
        }
        let Some(common) = self.intersect(other) else {
            return vec![self.clone()];
        };

        let mut pieces = Vec::new();
        let mut rest = self.clone();
        let mut keep = |piece: CuboidKey| {
            if !piece.is_empty() {
                pieces.push(piece);
            }
        };

        keep(CuboidKey {
            token_ids: range::subtract(&rest.token_ids, &other.token_ids),
            ..rest.clone()
        });
        rest.token_ids = common.token_ids;

        keep(CuboidKey {
            transfer_times: range::subtract(&rest.transfer_times, &other.transfer_times),
            ..rest.clone()
        });
        rest.transfer_times = common.transfer_times;

        keep(CuboidKey {
            ownership_times: range::subtract(&rest.ownership_times, &other.ownership_times),
            ..rest.clone()
        });
        rest.ownership_times = common.ownership_times;

        keep(CuboidKey {
            from: ops::remove(&rest.from, &other.from),
            ..rest.clone()
        });
        rest.from = common.from;

        keep(CuboidKey {
            to: ops::remove(&rest.to, &other.to),
            ..rest.clone()
        });
        rest.to = common.to;

        keep(CuboidKey {
            initiated_by: ops::remove(&rest.initiated_by, &other.initiated_by),
            ..rest.clone()
        });
        rest.initiated_by = common.initiated_by;

        keep(CuboidKey {
            approval_ids: ops::remove(&rest.approval_ids, &other.approval_ids),
            ..rest
        });

        pieces
    }

    /// The parts of `self` that none of `others` cover.
    pub fn subtract_all<'a, I>(&self, others: I) -> Vec<CuboidKey>
    where
        I: IntoIterator<Item = &'a CuboidKey>,
    {
        if self.is_empty() {
            return Vec::new();
        }
        let mut remaining = vec![self.clone()];
        for other in others {
            remaining = remaining.iter().flat_map(|r| r.subtract(other)).collect();
            if remaining.is_empty() {
                break;
            }
        }
        remaining
    }

    /// The dimensions that do not span their whole universe, rendered.
    pub fn constrained_dimensions(&self) -> Vec<(&'static str, String)> {
        let mut dims = Vec::new();
        let mut ranges = |name: &'static str, set: &[UintRange]| {
            if !range::is_full(set) {
                dims.push((name, range::display_ranges(set)));
            }
        };
        ranges("tokenIds", &self.token_ids);
        ranges("transferTimes", &self.transfer_times);
        ranges("ownershipTimes", &self.ownership_times);

        for (name, list) in [
            ("fromList", &self.from),
            ("toList", &self.to),
            ("initiatedByList", &self.initiated_by),
            ("approvalIdList", &self.approval_ids),
        ] {
            if !list.is_everyone() {
                dims.push((name, list.derived_id()));
            }
        }
        dims
    }
}

/// One disjoint piece of a projected permission list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCuboid {
    pub key: CuboidKey,
    pub permitted: Vec<UintRange>,
    pub forbidden: Vec<UintRange>,
    pub arbitrary_value: Option<Bytes>,
    /// Index of the entry this piece was carved from.
    pub source_index: usize,
}

impl PermissionCuboid {
    /// True iff no time is locked either way.
    pub fn is_unhandled(&self) -> bool {
        self.permitted.is_empty() && self.forbidden.is_empty()
    }

    /// Every locked time, permitted or forbidden.
    pub fn locked_times(&self) -> Vec<UintRange> {
        range::union(&self.permitted, &self.forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u64, end: u64) -> UintRange {
        UintRange::of(start, end)
    }

    fn tokens(ranges: Vec<UintRange>) -> CuboidKey {
        CuboidKey {
            token_ids: ranges,
            ..CuboidKey::full()
        }
    }

    #[test]
    fn test_unused_dimensions_are_full() {
        let perm = UniversalPermission {
            token_ids: vec![r(1, 10)],
            transfer_times: vec![r(5, 6)],
            uses_token_ids: true,
            ..UniversalPermission::default()
        };
        let key = perm.key();
        assert_eq!(key.token_ids, vec![r(1, 10)]);
        assert_eq!(key.transfer_times, vec![UintRange::full()]);
        assert!(key.from.is_everyone());
    }

    #[test]
    fn test_intersect_and_disjoint() {
        let a = tokens(vec![r(1, 10)]);
        let b = tokens(vec![r(5, 20)]);
        assert_eq!(a.intersect(&b).unwrap().token_ids, vec![r(5, 10)]);
        assert!(tokens(vec![r(1, 4)]).intersect(&tokens(vec![r(5, 9)])).is_none());
    }

    #[test]
    fn test_list_dimension_disjointness() {
        let alice = CuboidKey {
            from: AddressList::whitelist("a", vec!["alice".into()]),
            ..CuboidKey::full()
        };
        let not_alice = CuboidKey {
            from: AddressList::blacklist("", vec!["alice".into()]),
            ..CuboidKey::full()
        };
        assert!(!alice.overlaps(&not_alice));

        let rest = CuboidKey::full().subtract(&alice);
        assert_eq!(rest.len(), 1);
        assert!(rest[0].from.same_membership(&not_alice.from));
    }

    #[test]
    fn test_subtract_narrows_progressively() {
        let a = CuboidKey {
            token_ids: vec![r(1, 10)],
            transfer_times: vec![r(1, 10)],
            ..CuboidKey::full()
        };
        let b = CuboidKey {
            token_ids: vec![r(5, 15)],
            transfer_times: vec![r(5, 15)],
            ..CuboidKey::full()
        };
        let pieces = a.subtract(&b);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].token_ids, vec![r(1, 4)]);
        assert_eq!(pieces[0].transfer_times, vec![r(1, 10)]);
        assert_eq!(pieces[1].token_ids, vec![r(5, 10)]);
        assert_eq!(pieces[1].transfer_times, vec![r(1, 4)]);
        assert!(!pieces[0].overlaps(&pieces[1]));
        assert!(pieces.iter().all(|p| !p.overlaps(&b)));
    }

    #[test]
    fn test_subtract_all_covered() {
        let a = tokens(vec![r(1, 10)]);
        let halves = [tokens(vec![r(1, 5)]), tokens(vec![r(6, 10)])];
        assert!(a.subtract_all(&halves).is_empty());
        assert_eq!(a.subtract_all(&halves[..1]), vec![tokens(vec![r(6, 10)])]);
    }

    #[test]
    fn test_empty_key_subtracts_to_nothing() {
        let nobody = CuboidKey {
            from: AddressList::none(),
            ..CuboidKey::full()
        };
        assert!(nobody.is_empty());
        assert!(nobody.subtract(&tokens(vec![r(1, 5)])).is_empty());
        assert!(nobody.subtract(&nobody).is_empty());
        let no_others: [CuboidKey; 0] = [];
        assert!(nobody.subtract_all(&no_others).is_empty());

        let no_tokens = tokens(vec![]);
        assert!(no_tokens.subtract(&CuboidKey::full()).is_empty());
        assert!(no_tokens.subtract_all(&[tokens(vec![r(9, 9)])]).is_empty());

        // Subtracting an empty key removes nothing.
        let a = tokens(vec![r(1, 10)]);
        assert_eq!(a.subtract(&nobody), vec![a.clone()]);
        assert_eq!(a.subtract_all(&[no_tokens]), vec![a]);
    }

    #[test]
    fn test_none_permission_has_empty_key() {
        let perm = UniversalPermission {
            from_list: AddressList::none(),
            uses_from_list: true,
            ..UniversalPermission::with_times(vec![UintRange::full()], vec![])
        };
        let key = perm.key();
        assert!(key.is_empty());
        let no_others: [CuboidKey; 0] = [];
        assert!(key.subtract_all(&[CuboidKey::full()]).is_empty());
        assert!(key.subtract_all(&no_others).is_empty());
    }

    #[test]
    fn test_constrained_dimensions() {
        assert!(CuboidKey::full().constrained_dimensions().is_empty());
        let key = CuboidKey {
            token_ids: vec![r(6, 10)],
            to: AddressList::whitelist("x", vec!["bob".into()]),
            ..CuboidKey::full()
        };
        assert_eq!(
            key.constrained_dimensions(),
            vec![("tokenIds", "[6-10]".to_string()), ("toList", "bob".to_string())]
        );
    }
}
