//! Proptest strategies for property-based testing.
//!
//! Range sets are built from sorted cut points so they are valid by
//! construction: well-formed, non-overlapping and non-adjacent.

use std::collections::HashSet;
use std::ops::Range;

use proptest::prelude::*;

use issuance_kernel_core::{UintRange, MINT_ADDRESS};
use issuance_kernel_lists::AddressList;
use issuance_kernel_perms::{TokenIdsActionPermission, UniversalPermission};

/// Opaque members used for list-valued dimensions.
pub const MEMBERS: [&str; 4] = ["alice", "bob", "charlie", MINT_ADDRESS];

/// A normalized range set with every bound inside `bounds`.
pub fn range_set(bounds: Range<u64>) -> impl Strategy<Value = Vec<UintRange>> {
    cut_ranges(bounds, 0..8)
}

/// Like [`range_set`], but always holding at least one range.
pub fn key_range_set(bounds: Range<u64>) -> impl Strategy<Value = Vec<UintRange>> {
    cut_ranges(bounds, 2..8)
}

fn cut_ranges(bounds: Range<u64>, cuts: Range<usize>) -> impl Strategy<Value = Vec<UintRange>> {
    prop::collection::btree_set(bounds, cuts).prop_map(|points| {
        let points: Vec<u64> = points.into_iter().collect();
        // Ending one short of the next cut keeps neighbours apart.
        points
            .chunks_exact(2)
            .map(|pair| UintRange::of(pair[0], pair[1] - 1))
            .collect()
    })
}

/// Disjoint `(permitted, forbidden)` time sets inside `bounds`.
pub fn time_split(bounds: Range<u64>) -> impl Strategy<Value = (Vec<UintRange>, Vec<UintRange>)> {
    range_set(bounds).prop_map(|ranges| {
        let (permitted, forbidden): (Vec<_>, Vec<_>) =
            ranges.into_iter().enumerate().partition(|(i, _)| i % 2 == 0);
        (
            permitted.into_iter().map(|(_, r)| r).collect(),
            forbidden.into_iter().map(|(_, r)| r).collect(),
        )
    })
}

/// A list over [`MEMBERS`], whitelist or blacklist.
pub fn address_list() -> impl Strategy<Value = AddressList> {
    (
        any::<bool>(),
        prop::sample::subsequence(MEMBERS.to_vec(), 0..=MEMBERS.len()),
    )
        .prop_map(|(whitelist, members)| {
            let list = AddressList::new(
                "",
                members.into_iter().map(String::from).collect(),
                whitelist,
            );
            let id = list.derived_id();
            list.with_id(id)
        })
}

pub fn token_ids_permission() -> impl Strategy<Value = TokenIdsActionPermission> {
    (key_range_set(0..64), time_split(0..64)).prop_map(|(token_ids, (permitted, forbidden))| {
        TokenIdsActionPermission {
            token_ids,
            permanently_permitted_times: permitted,
            permanently_forbidden_times: forbidden,
        }
    })
}

/// A structurally valid permission list: no two entries share token ids.
pub fn token_ids_permissions() -> impl Strategy<Value = Vec<TokenIdsActionPermission>> {
    prop::collection::vec(token_ids_permission(), 0..5).prop_map(|mut perms| {
        let mut seen = HashSet::new();
        perms.retain(|p| seen.insert(p.token_ids.clone()));
        perms
    })
}

/// A universal permission using a random subset of four dimensions.
pub fn universal_permission() -> impl Strategy<Value = UniversalPermission> {
    (
        (range_set(0..64), any::<bool>()),
        (range_set(0..64), any::<bool>()),
        (address_list(), any::<bool>()),
        (address_list(), any::<bool>()),
        time_split(0..64),
    )
        .prop_map(
            |(
                (token_ids, uses_token_ids),
                (transfer_times, uses_transfer_times),
                (from_list, uses_from_list),
                (initiated_by_list, uses_initiated_by_list),
                (permitted, forbidden),
            )| UniversalPermission {
                token_ids,
                uses_token_ids,
                transfer_times,
                uses_transfer_times,
                from_list,
                uses_from_list,
                initiated_by_list,
                uses_initiated_by_list,
                ..UniversalPermission::with_times(permitted, forbidden)
            },
        )
}

pub fn universal_permissions(max_len: usize) -> impl Strategy<Value = Vec<UniversalPermission>> {
    prop::collection::vec(universal_permission(), 0..=max_len)
}
