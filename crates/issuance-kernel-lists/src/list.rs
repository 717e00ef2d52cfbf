//! The address-list record.
//!
//! A list is a predicate over addresses expressed as a `(whitelist, addresses)`
//! pair: a whitelist admits exactly its addresses, a blacklist admits
//! everything except them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use issuance_kernel_core::AddressValidator;

use crate::error::{ListError, Result};

/// An address list, stored or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressList {
    /// Identifier. For resolved lists this echoes the requested id,
    /// including any inversion wrapper.
    pub list_id: String,

    /// Ordered, duplicate-free addresses.
    pub addresses: Vec<String>,

    /// `true` admits exactly `addresses`; `false` admits their complement.
    pub whitelist: bool,

    pub uri: String,
    pub custom_data: String,
    pub created_by: String,
}

impl AddressList {
    pub fn new(list_id: impl Into<String>, addresses: Vec<String>, whitelist: bool) -> Self {
        Self {
            list_id: list_id.into(),
            addresses,
            whitelist,
            ..Default::default()
        }
    }

    pub fn whitelist(list_id: impl Into<String>, addresses: Vec<String>) -> Self {
        Self::new(list_id, addresses, true)
    }

    pub fn blacklist(list_id: impl Into<String>, addresses: Vec<String>) -> Self {
        Self::new(list_id, addresses, false)
    }

    /// Everyone.
    pub fn all() -> Self {
        Self::blacklist("All", Vec::new())
    }

    /// No-one.
    pub fn none() -> Self {
        Self::whitelist("None", Vec::new())
    }

    pub fn with_id(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = list_id.into();
        self
    }

    pub fn with_metadata(mut self, uri: impl Into<String>, custom_data: impl Into<String>) -> Self {
        self.uri = uri.into();
        self.custom_data = custom_data.into();
        self
    }

    pub fn with_creator(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// The complement of this list. Metadata is kept.
    pub fn inverted(mut self) -> Self {
        self.whitelist = !self.whitelist;
        self
    }

    /// True iff no address is a member.
    pub fn is_empty(&self) -> bool {
        self.whitelist && self.addresses.is_empty()
    }

    /// True iff every address is a member.
    pub fn is_everyone(&self) -> bool {
        !self.whitelist && self.addresses.is_empty()
    }

    /// A copy with addresses sorted and deduplicated.
    pub fn canonicalize(&self) -> Self {
        let mut canonical = self.clone();
        canonical.addresses.sort();
        canonical.addresses.dedup();
        canonical
    }

    /// True iff both lists admit exactly the same addresses.
    pub fn same_membership(&self, other: &AddressList) -> bool {
        if self.whitelist != other.whitelist {
            return false;
        }
        let a: HashSet<&str> = self.addresses.iter().map(String::as_str).collect();
        let b: HashSet<&str> = other.addresses.iter().map(String::as_str).collect();
        a == b
    }

    /// An id that resolves back to this list's membership.
    ///
    /// Used to label lists produced by set algebra.
    pub fn derived_id(&self) -> String {
        match (self.whitelist, self.addresses.is_empty()) {
            (true, true) => "None".to_string(),
            (true, false) => self.addresses.join(":"),
            (false, true) => "All".to_string(),
            (false, false) => format!("AllWithout{}", self.addresses.join(":")),
        }
    }
}

/// Validate the id of a list about to be stored.
///
/// Stored ids are non-empty, do not start with `!`, and use only `[A-Za-z0-9]`.
pub fn validate_stored_id(list_id: &str) -> Result<()> {
    if list_id.is_empty() {
        return Err(ListError::invalid_id(list_id, "empty id"));
    }
    if list_id.starts_with('!') {
        return Err(ListError::invalid_id(list_id, "stored ids cannot be inverted"));
    }
    if !list_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ListError::invalid_id(list_id, "only [A-Za-z0-9] is allowed"));
    }
    Ok(())
}

/// Validate the addresses of a list about to be stored.
///
/// Rejects empty strings, duplicates and anything the validator refuses.
/// The mint sentinel is allowed.
pub fn validate_addresses(
    list_id: &str,
    addresses: &[String],
    validator: &dyn AddressValidator,
) -> Result<()> {
    let mut seen = HashSet::with_capacity(addresses.len());
    for address in addresses {
        if !seen.insert(address.as_str()) {
            return Err(ListError::DuplicateAddresses {
                list_id: list_id.to_string(),
                address: address.clone(),
            });
        }
    }
    for address in addresses {
        validator
            .validate(address, true)
            .map_err(|source| ListError::InvalidAddress {
                list_id: list_id.to_string(),
                source,
            })?;
    }
    Ok(())
}
