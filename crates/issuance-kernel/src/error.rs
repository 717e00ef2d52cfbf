//! Error types for the Keeper.

use issuance_kernel_core::{CoreError, ErrorKind};
use issuance_kernel_lists::ListError;
use issuance_kernel_perms::PermsError;
use issuance_kernel_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Keeper operations.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Address-list error.
    #[error("address list error: {0}")]
    List(#[from] ListError),

    /// Permission error.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl KernelError {
    /// The domain kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::Core(e) => e.kind(),
            KernelError::Store(e) => e.kind(),
            KernelError::List(e) => e.kind(),
            KernelError::Permission(e) => e.kind(),
            KernelError::Config(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Wire-exact error code, e.g. `"INVALID_ID"`.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Result type for Keeper operations.
pub type Result<T> = std::result::Result<T, KernelError>;
