//! Error types for the issuance kernel core.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain-level error kinds shared by every crate in the workspace.
///
/// Each crate's error enum maps onto exactly one kind, so callers (and
/// replicas) can compare failures without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Structural violation of list-id syntax.
    InvalidId,
    /// Unknown stored list.
    NotFound,
    /// Id collides with an existing or reserved list.
    AlreadyExists,
    /// A list contains a repeated address.
    DuplicateAddresses,
    /// An address failed validation.
    InvalidAddress,
    /// The mint sentinel is combined with other addresses where that is forbidden.
    MintMixed,
    /// A permission update weakens a previously explicit time.
    PermissionWeakens,
    /// A permission list failed structural validation.
    PermissionMalformed,
    /// A permission forbids the action at the requested time.
    PermissionForbidden,
    /// A required entry or field is missing.
    InvalidRequest,
    /// The host store failed.
    Storage,
}

impl ErrorKind {
    /// Wire-exact code for this kind.
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidId => "INVALID_ID",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::DuplicateAddresses => "DUPLICATE_ADDRESSES",
            ErrorKind::InvalidAddress => "INVALID_ADDRESS",
            ErrorKind::MintMixed => "MINT_MIXED",
            ErrorKind::PermissionWeakens => "PERMISSION_WEAKENS",
            ErrorKind::PermissionMalformed => "PERMISSION_MALFORMED",
            ErrorKind::PermissionForbidden => "PERMISSION_FORBIDDEN",
            ErrorKind::InvalidRequest => "INVALID_REQUEST",
            ErrorKind::Storage => "STORAGE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Core errors: ranges, addresses and encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: U256, end: U256 },

    #[error("overlapping ranges in {0}")]
    OverlappingRanges(String),

    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

impl CoreError {
    /// The domain kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidRange { .. } | CoreError::OverlappingRanges(_) => {
                ErrorKind::PermissionMalformed
            }
            CoreError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            CoreError::EncodingError(_) | CoreError::DecodingError(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
