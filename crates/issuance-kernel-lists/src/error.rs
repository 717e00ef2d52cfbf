//! Error types for address-list operations.

use issuance_kernel_core::{CoreError, ErrorKind};
use issuance_kernel_store::StoreError;
use thiserror::Error;

/// Errors that can occur while creating or resolving address lists.
#[derive(Debug, Error)]
pub enum ListError {
    /// The list id is structurally invalid.
    #[error("invalid list id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    /// No stored list has this id.
    #[error("address list not found: {0}")]
    NotFound(String),

    /// The id is reserved or already stored.
    #[error("address list already exists: {0}")]
    AlreadyExists(String),

    /// An address appears twice in one list.
    #[error("duplicate address {address} in list {list_id}")]
    DuplicateAddresses { list_id: String, address: String },

    /// An address in a list failed validation.
    #[error("invalid address in list {list_id}: {source}")]
    InvalidAddress {
        list_id: String,
        #[source]
        source: CoreError,
    },

    /// Stored record could not be decoded.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ListError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::InvalidId { .. } => ErrorKind::InvalidId,
            ListError::NotFound(_) => ErrorKind::NotFound,
            ListError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ListError::DuplicateAddresses { .. } => ErrorKind::DuplicateAddresses,
            ListError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            ListError::Core(e) => e.kind(),
            ListError::Store(e) => e.kind(),
        }
    }

    pub(crate) fn invalid_id(id: &str, reason: impl Into<String>) -> Self {
        ListError::InvalidId {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for list operations.
pub type Result<T> = std::result::Result<T, ListError>;
