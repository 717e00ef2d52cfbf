//! Membership checks against resolved lists.

use crate::list::AddressList;

/// `present(list.addresses, address) XOR !list.whitelist`.
pub fn check_address(list: &AddressList, address: &str) -> bool {
    let present = list.addresses.iter().any(|a| a == address);
    present == list.whitelist
}

impl AddressList {
    /// True iff `address` is a member of this list.
    pub fn contains(&self, address: &str) -> bool {
        check_address(self, address)
    }
}

/// The three lists an approval is keyed on.
#[derive(Debug, Clone, Copy)]
pub struct TransferLists<'a> {
    pub from: &'a AddressList,
    pub to: &'a AddressList,
    pub initiated_by: &'a AddressList,
}

impl TransferLists<'_> {
    /// True iff every party is a member of its list.
    pub fn matches(&self, from: &str, to: &str, initiated_by: &str) -> bool {
        self.from.contains(from) && self.to.contains(to) && self.initiated_by.contains(initiated_by)
    }
}
