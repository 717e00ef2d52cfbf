//! Address syntax and the mint sentinel.
//!
//! The kernel treats addresses as opaque strings. Whether a string is an
//! address is decided by an injected [`AddressValidator`]; the default
//! [`PrefixedHexValidator`] accepts `<prefix>` followed by 40 lowercase hex
//! characters, which is what [`derive_address`] produces.

use crate::crypto::{Blake3Hash, Ed25519PublicKey};
use crate::error::{CoreError, Result};

/// The pseudo-address denoting the issuance origin.
pub const MINT_ADDRESS: &str = "Mint";

/// Number of digest bytes encoded into an address.
pub const ADDRESS_BYTES: usize = 20;

/// Decides whether a string is a syntactically valid address.
pub trait AddressValidator: Send + Sync {
    /// Validate `address`. The mint sentinel passes only when `allow_mint`.
    fn validate(&self, address: &str, allow_mint: bool) -> Result<()>;

    fn is_valid(&self, address: &str, allow_mint: bool) -> bool {
        self.validate(address, allow_mint).is_ok()
    }
}

/// `<prefix><40 lowercase hex chars>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedHexValidator {
    prefix: String,
}

impl PrefixedHexValidator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl AddressValidator for PrefixedHexValidator {
    fn validate(&self, address: &str, allow_mint: bool) -> Result<()> {
        if address == MINT_ADDRESS {
            if allow_mint {
                return Ok(());
            }
            return Err(CoreError::invalid_address(address, "mint address not allowed"));
        }
        if address.is_empty() {
            return Err(CoreError::invalid_address(address, "empty address"));
        }

        let body = address
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| {
                CoreError::invalid_address(address, format!("missing prefix {:?}", self.prefix))
            })?;

        if body.len() != ADDRESS_BYTES * 2 {
            return Err(CoreError::invalid_address(
                address,
                format!("expected {} hex characters, got {}", ADDRESS_BYTES * 2, body.len()),
            ));
        }
        if !body
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(CoreError::invalid_address(address, "not lowercase hex"));
        }
        Ok(())
    }
}

/// Derive the address of a public key: `prefix` + hex(Blake3(key)[..20]).
pub fn derive_address(prefix: &str, public_key: &Ed25519PublicKey) -> String {
    let digest = Blake3Hash::hash(public_key.as_bytes());
    format!("{}{}", prefix, hex::encode(&digest.as_bytes()[..ADDRESS_BYTES]))
}
