//! Human-readable location of a permission-update violation.

use std::fmt;

use issuance_kernel_core::range::{display_ranges, UintRange};

use crate::universal::CuboidKey;

/// What went wrong at the located cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// A permanently permitted time is no longer permitted.
    NoLongerPermitted,
    /// A permanently forbidden time is no longer forbidden.
    NoLongerForbidden,
    /// A region with locked times has no entry in the new list.
    Uncovered,
}

/// Where an update violated a previously locked time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionLocator {
    /// Index of the old entry the region came from.
    pub old_index: usize,
    /// Index of the new entry it was compared against, if any.
    pub new_index: Option<usize>,
    /// The violating region.
    pub key: CuboidKey,
    /// The locked times that were lost.
    pub times: Vec<UintRange>,
    pub violation: Violation,
}

impl fmt::Display for PermissionLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.new_index {
            Some(new_index) => write!(f, "old entry {} vs new entry {new_index}", self.old_index)?,
            None => write!(f, "old entry {}", self.old_index)?,
        }

        let dims = self.key.constrained_dimensions();
        if dims.is_empty() {
            f.write_str(" at every key")?;
        } else {
            let dims: Vec<String> = dims
                .into_iter()
                .map(|(name, value)| format!("{name} {value}"))
                .collect();
            write!(f, " at {}", dims.join(", "))?;
        }

        let times = display_ranges(&self.times);
        match self.violation {
            Violation::NoLongerPermitted => {
                write!(f, ": permanently permitted times {times} are no longer permitted")
            }
            Violation::NoLongerForbidden => {
                write!(f, ": permanently forbidden times {times} are no longer forbidden")
            }
            Violation::Uncovered => {
                write!(f, ": locked times {times} are not covered by the new permissions")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let locator = PermissionLocator {
            old_index: 0,
            new_index: Some(1),
            key: CuboidKey {
                token_ids: vec![UintRange::of(6, 10)],
                ..CuboidKey::full()
            },
            times: vec![UintRange::full()],
            violation: Violation::NoLongerPermitted,
        };
        assert_eq!(
            locator.to_string(),
            "old entry 0 vs new entry 1 at tokenIds [6-10]: \
             permanently permitted times [0-max] are no longer permitted"
        );
    }

    #[test]
    fn test_display_uncovered_everywhere() {
        let locator = PermissionLocator {
            old_index: 2,
            new_index: None,
            key: CuboidKey::full(),
            times: vec![UintRange::of(1, 5)],
            violation: Violation::Uncovered,
        };
        assert_eq!(
            locator.to_string(),
            "old entry 2 at every key: locked times [1-5] are not covered by the new permissions"
        );
    }
}
