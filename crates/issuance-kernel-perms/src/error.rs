//! Error types for the permissions module.

use issuance_kernel_core::{CoreError, ErrorKind, UintRange, U256};
use issuance_kernel_lists::ListError;
use thiserror::Error;

use crate::locator::PermissionLocator;

/// Errors that can occur while validating or checking permissions.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A required entry or field is missing.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Structural validation failed.
    #[error("malformed permission: {0}")]
    Malformed(String),

    /// An update changed a previously locked time.
    #[error("permission update weakens a locked time: {0}")]
    Weakens(Box<PermissionLocator>),

    /// A permission forbids the action right now.
    #[error("forbidden by permission entry {entry} at time {now} (forbidden times {times})")]
    Forbidden {
        entry: usize,
        now: U256,
        times: String,
    },

    /// The mint sentinel is mixed with other addresses in a from-list.
    #[error("approval {approval_id:?}: from list {list_id:?} mixes Mint with other addresses")]
    MintMixed { approval_id: String, list_id: String },

    /// An approval id is unusable as a tracker alias.
    #[error("invalid approval id {id:?}: {reason}")]
    InvalidApprovalId { id: String, reason: String },

    /// List resolution failed.
    #[error("list error: {0}")]
    List(#[from] ListError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl PermsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PermsError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            PermsError::Malformed(_) => ErrorKind::PermissionMalformed,
            PermsError::Weakens(_) => ErrorKind::PermissionWeakens,
            PermsError::Forbidden { .. } => ErrorKind::PermissionForbidden,
            PermsError::MintMixed { .. } => ErrorKind::MintMixed,
            PermsError::InvalidApprovalId { .. } => ErrorKind::InvalidId,
            PermsError::List(e) => e.kind(),
            PermsError::Core(e) => e.kind(),
        }
    }

    /// The locator of a weakening error.
    pub fn locator(&self) -> Option<&PermissionLocator> {
        match self {
            PermsError::Weakens(locator) => Some(locator),
            _ => None,
        }
    }

    pub(crate) fn forbidden(entry: usize, now: U256, times: &[UintRange]) -> Self {
        PermsError::Forbidden {
            entry,
            now,
            times: issuance_kernel_core::range::display_ranges(times),
        }
    }
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
