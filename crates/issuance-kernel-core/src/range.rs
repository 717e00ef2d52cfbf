//! Closed-interval algebra over unsigned 256-bit integers.
//!
//! Token ids, transfer times and ownership times are all expressed as sets of
//! [`UintRange`]. Every set operation returns a *normalized* set: sorted by
//! `start` then `end`, non-overlapping, with adjacent ranges merged. Ranges
//! with `start > end` are ill-formed and are ignored by the set operations;
//! [`validate_ranges`] rejects them.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const ONE: U256 = U256::from_limbs([1, 0, 0, 0]);

/// A closed interval `[start, end]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UintRange {
    pub start: U256,
    pub end: U256,
}

impl UintRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: U256, end: U256) -> Result<Self> {
        let range = Self { start, end };
        if !range.is_well_formed() {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(range)
    }

    /// Create a range from `u64` bounds without checking them.
    pub fn of(start: u64, end: u64) -> Self {
        Self {
            start: U256::from(start),
            end: U256::from(end),
        }
    }

    /// The maximal representable interval.
    pub const fn full() -> Self {
        Self {
            start: U256::ZERO,
            end: U256::MAX,
        }
    }

    /// The range `[start, MAX]`.
    pub const fn from_start(start: U256) -> Self {
        Self {
            start,
            end: U256::MAX,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }

    pub fn contains(&self, value: U256) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn overlaps(&self, other: &UintRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The common part of two ranges, if any.
    pub fn intersect(&self, other: &UintRange) -> Option<UintRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(UintRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// `self` minus `other`: zero, one or two ranges.
    pub fn subtract(&self, other: &UintRange) -> Vec<UintRange> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        // other.start > self.start >= 0, so the decrement cannot underflow.
        if other.start > self.start {
            pieces.push(UintRange {
                start: self.start,
                end: other.start - ONE,
            });
        }
        // other.end < self.end <= MAX, so the increment cannot overflow.
        if other.end < self.end {
            pieces.push(UintRange {
                start: other.end + ONE,
                end: self.end,
            });
        }
        pieces
    }
}

impl fmt::Debug for UintRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UintRange({self})")
    }
}

impl fmt::Display for UintRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end == U256::MAX {
            write!(f, "[{}-max]", self.start)
        } else {
            write!(f, "[{}-{}]", self.start, self.end)
        }
    }
}

/// Sort, drop ill-formed ranges, and merge overlapping or adjacent ranges.
pub fn normalize(ranges: &[UintRange]) -> Vec<UintRange> {
    let mut sorted: Vec<UintRange> = ranges
        .iter()
        .copied()
        .filter(UintRange::is_well_formed)
        .collect();
    sorted.sort();

    let mut merged: Vec<UintRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.end == U256::MAX || range.start <= last.end + ONE => {
                if range.end > last.end {
                    last.end = range.end;
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

pub fn union(a: &[UintRange], b: &[UintRange]) -> Vec<UintRange> {
    let mut all = Vec::with_capacity(a.len() + b.len());
    all.extend_from_slice(a);
    all.extend_from_slice(b);
    normalize(&all)
}

pub fn intersect(a: &[UintRange], b: &[UintRange]) -> Vec<UintRange> {
    let mut common = Vec::new();
    for x in a.iter().filter(|r| r.is_well_formed()) {
        for y in b.iter().filter(|r| r.is_well_formed()) {
            if let Some(overlap) = x.intersect(y) {
                common.push(overlap);
            }
        }
    }
    normalize(&common)
}

/// Everything in `a` that is not in `b`.
pub fn subtract(a: &[UintRange], b: &[UintRange]) -> Vec<UintRange> {
    let mut remaining = normalize(a);
    for removed in normalize(b) {
        remaining = remaining
            .into_iter()
            .flat_map(|r| r.subtract(&removed))
            .collect();
        if remaining.is_empty() {
            break;
        }
    }
    normalize(&remaining)
}

pub fn is_subset(a: &[UintRange], b: &[UintRange]) -> bool {
    subtract(a, b).is_empty()
}

/// True iff the union of `ranges` is the maximal interval.
pub fn is_full(ranges: &[UintRange]) -> bool {
    matches!(normalize(ranges).as_slice(), [only] if only.is_full())
}

pub fn contains(ranges: &[UintRange], value: U256) -> bool {
    ranges.iter().any(|r| r.contains(value))
}

/// True iff two ranges of the set share a value.
pub fn has_overlaps(ranges: &[UintRange]) -> bool {
    let mut sorted = ranges.to_vec();
    sorted.sort();
    sorted.windows(2).any(|pair| pair[1].start <= pair[0].end)
}

/// Reject ill-formed ranges and ranges that overlap within the set.
///
/// `field` names the set in the error message.
pub fn validate_ranges(ranges: &[UintRange], field: &str) -> Result<()> {
    if let Some(bad) = ranges.iter().find(|r| !r.is_well_formed()) {
        return Err(CoreError::InvalidRange {
            start: bad.start,
            end: bad.end,
        });
    }
    if has_overlaps(ranges) {
        return Err(CoreError::OverlappingRanges(field.to_string()));
    }
    Ok(())
}

/// Render a range set as `[a-b], [c-d]`, `none` when empty.
pub fn display_ranges(ranges: &[UintRange]) -> String {
    if ranges.is_empty() {
        return "none".to_string();
    }
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(start: u64, end: u64) -> UintRange {
        UintRange::of(start, end)
    }

    #[test]
    fn test_new_rejects_reversed() {
        assert!(UintRange::new(U256::from(5u64), U256::from(1u64)).is_err());
        assert!(UintRange::new(U256::from(1u64), U256::from(1u64)).is_ok());
    }

    #[test]
    fn test_contains_and_overlaps() {
        assert!(r(1, 10).contains(U256::from(1u64)));
        assert!(r(1, 10).contains(U256::from(10u64)));
        assert!(!r(1, 10).contains(U256::from(11u64)));
        assert!(r(1, 5).overlaps(&r(5, 9)));
        assert!(!r(1, 4).overlaps(&r(5, 9)));
    }

    #[test]
    fn test_normalize_merges_adjacent() {
        assert_eq!(normalize(&[r(6, 10), r(1, 5)]), vec![r(1, 10)]);
        assert_eq!(normalize(&[r(1, 3), r(5, 7)]), vec![r(1, 3), r(5, 7)]);
        assert_eq!(normalize(&[r(1, 10), r(2, 3)]), vec![r(1, 10)]);
    }

    #[test]
    fn test_normalize_at_max_does_not_overflow() {
        let tail = UintRange::from_start(U256::from(10u64));
        assert_eq!(normalize(&[tail, r(20, 30)]), vec![tail]);
        assert!(is_full(&[r(0, 9), tail]));
    }

    #[test]
    fn test_subtract_splits() {
        assert_eq!(subtract(&[r(1, 10)], &[r(4, 6)]), vec![r(1, 3), r(7, 10)]);
        assert!(subtract(&[r(1, 10)], &[r(1, 10)]).is_empty());
        assert_eq!(subtract(&[r(1, 10)], &[r(20, 30)]), vec![r(1, 10)]);
        assert_eq!(
            subtract(&[UintRange::full()], &[r(0, 0)]),
            vec![UintRange::from_start(U256::from(1u64))]
        );
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(&[r(1, 10)], &[r(5, 20)]), vec![r(5, 10)]);
        assert_eq!(intersect(&[r(1, 4), r(8, 12)], &[r(3, 9)]), vec![r(3, 4), r(8, 9)]);
        assert!(intersect(&[r(1, 4)], &[r(5, 9)]).is_empty());
    }

    #[test]
    fn test_subset_and_full() {
        assert!(is_subset(&[r(2, 3)], &[r(1, 10)]));
        assert!(!is_subset(&[r(2, 30)], &[r(1, 10)]));
        assert!(is_subset(&[], &[]));
        assert!(is_full(&[UintRange::full()]));
        assert!(!is_full(&[r(0, 100)]));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(validate_ranges(&[r(1, 5), r(6, 9)], "tokenIds").is_ok());
        assert!(matches!(
            validate_ranges(&[r(1, 5), r(5, 9)], "tokenIds"),
            Err(CoreError::OverlappingRanges(_))
        ));
        assert!(matches!(
            validate_ranges(&[r(9, 5)], "tokenIds"),
            Err(CoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(r(1, 5).to_string(), "[1-5]");
        assert_eq!(UintRange::full().to_string(), "[0-max]");
        assert_eq!(display_ranges(&[]), "none");
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<UintRange>> {
        prop::collection::vec(
            (0u64..64, 0u64..16).prop_map(|(start, len)| r(start, start + len)),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(a in arb_ranges()) {
            let once = normalize(&a);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_subtract_and_intersect_partition(a in arb_ranges(), b in arb_ranges()) {
            let rest = subtract(&a, &b);
            let common = intersect(&a, &b);
            prop_assert!(intersect(&rest, &b).is_empty());
            prop_assert!(intersect(&rest, &common).is_empty());
            prop_assert_eq!(union(&rest, &common), normalize(&a));
        }

        #[test]
        fn test_membership_agrees_pointwise(a in arb_ranges(), b in arb_ranges(), x in 0u64..96) {
            let x = U256::from(x);
            prop_assert_eq!(contains(&intersect(&a, &b), x), contains(&a, x) && contains(&b, x));
            prop_assert_eq!(contains(&subtract(&a, &b), x), contains(&a, x) && !contains(&b, x));
            prop_assert_eq!(contains(&union(&a, &b), x), contains(&a, x) || contains(&b, x));
        }
    }
}
