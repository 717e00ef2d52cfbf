//! Address-list registry: creation, lookup and resolution over a host store.
//!
//! The registry borrows its store and address validator; it holds no state of
//! its own, so it is cheap to build per call.

use issuance_kernel_core::{from_canonical_bytes, to_canonical_bytes, AddressValidator};
use issuance_kernel_store::{KvStore, StagedStore, StoreExt};

use crate::error::{ListError, Result};
use crate::expr::{is_reserved_id, ListExpr, ResolveMode};
use crate::list::{validate_addresses, validate_stored_id, AddressList};

/// Default namespace of stored lists.
pub const ADDRESS_LISTS_NAMESPACE: &str = "addressLists";

/// Default namespace of module parameters and counters.
pub const PARAMS_NAMESPACE: &str = "params";

/// Key of the list-creation counter within the params namespace.
pub const NEXT_ADDRESS_LIST_ID_KEY: &str = "nextAddressListId";

/// Store namespaces used by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    pub address_lists: String,
    pub params: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            address_lists: ADDRESS_LISTS_NAMESPACE.to_string(),
            params: PARAMS_NAMESPACE.to_string(),
        }
    }
}

/// Anything that can turn a list id into a resolved list.
pub trait ListSource {
    fn resolve(&self, list_id: &str, mode: ResolveMode) -> Result<AddressList>;

    /// Resolve with strict address pieces and stored-list fallback.
    fn address_list(&self, list_id: &str) -> Result<AddressList> {
        self.resolve(list_id, ResolveMode::AddressList)
    }

    /// Resolve with opaque alias pieces. Never reports `NotFound`.
    fn tracker_list(&self, list_id: &str) -> Result<AddressList> {
        self.resolve(list_id, ResolveMode::Tracker)
    }
}

/// Address lists backed by a [`KvStore`].
pub struct ListRegistry<'a, S: KvStore + ?Sized> {
    store: &'a S,
    validator: &'a dyn AddressValidator,
    namespaces: Namespaces,
}

impl<'a, S: KvStore + ?Sized> ListRegistry<'a, S> {
    pub fn new(store: &'a S, validator: &'a dyn AddressValidator) -> Self {
        Self {
            store,
            validator,
            namespaces: Namespaces::default(),
        }
    }

    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Validate and store a new list, then bump the creation counter.
    ///
    /// Both writes are staged and committed together.
    pub fn create_address_list(&self, list: &AddressList) -> Result<()> {
        let list_id = list.list_id.as_str();
        validate_stored_id(list_id)?;

        if is_reserved_id(list_id) || self.validator.is_valid(list_id, true) {
            return Err(ListError::AlreadyExists(format!("{list_id} (reserved)")));
        }

        validate_addresses(list_id, &list.addresses, self.validator)?;

        if self.store.has(&self.namespaces.address_lists, list_id)? {
            return Err(ListError::AlreadyExists(list_id.to_string()));
        }

        let bytes = to_canonical_bytes(list)?;
        let staged = StagedStore::new(self.store);
        staged.put(&self.namespaces.address_lists, list_id, &bytes)?;
        let seq = staged.increment_counter(&self.namespaces.params, NEXT_ADDRESS_LIST_ID_KEY)?;
        staged.commit()?;

        tracing::debug!(list_id, seq, addresses = list.addresses.len(), "created address list");
        Ok(())
    }

    /// Resolve an id in address-list mode.
    pub fn get_address_list_by_id(&self, list_id: &str) -> Result<AddressList> {
        self.resolve(list_id, ResolveMode::AddressList)
    }

    /// Resolve an id in tracker mode.
    pub fn get_tracker_list_by_id(&self, list_id: &str) -> Result<AddressList> {
        self.resolve(list_id, ResolveMode::Tracker)
    }

    /// Membership of `address` in the list named by `list_id`.
    pub fn check_address(&self, list_id: &str, address: &str) -> Result<bool> {
        Ok(self.get_address_list_by_id(list_id)?.contains(address))
    }

    /// Stored lists whose id starts with `prefix`, in id order.
    pub fn address_lists(&self, prefix: &str) -> Result<Vec<AddressList>> {
        self.store
            .iterate(&self.namespaces.address_lists, prefix)?
            .into_iter()
            .map(|(_, bytes)| Ok(from_canonical_bytes(&bytes)?))
            .collect()
    }

    /// The value the creation counter will assign next.
    pub fn next_address_list_id(&self) -> Result<u64> {
        Ok(self
            .store
            .counter(&self.namespaces.params, NEXT_ADDRESS_LIST_ID_KEY)?)
    }

    fn load_stored(&self, list_id: &str) -> Result<AddressList> {
        let bytes = self
            .store
            .get(&self.namespaces.address_lists, list_id)?
            .ok_or_else(|| ListError::NotFound(list_id.to_string()))?;
        Ok(from_canonical_bytes(&bytes)?)
    }
}

impl<S: KvStore + ?Sized> ListSource for ListRegistry<'_, S> {
    fn resolve(&self, list_id: &str, mode: ResolveMode) -> Result<AddressList> {
        let expr = ListExpr::parse(list_id, mode, self.validator)?;
        let list = expr.evaluate(&mut |stored| self.load_stored(stored))?;
        tracing::trace!(list_id, ?mode, whitelist = list.whitelist, "resolved list");
        Ok(list.with_id(list_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuance_kernel_core::{ErrorKind, PrefixedHexValidator, MINT_ADDRESS};
    use issuance_kernel_store::MemoryStore;

    fn addr(c: char) -> String {
        format!("bb{}", c.to_string().repeat(40))
    }

    #[test]
    fn test_create_then_get() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        let list = AddressList::whitelist("friends", vec![addr('a'), addr('b')])
            .with_metadata("ipfs://x", "{}");
        registry.create_address_list(&list).unwrap();

        assert_eq!(registry.get_address_list_by_id("friends").unwrap(), list);
        assert_eq!(registry.next_address_list_id().unwrap(), 2);
    }

    #[test]
    fn test_create_rejections() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        let kind = |id: &str, addresses: Vec<String>| {
            registry
                .create_address_list(&AddressList::whitelist(id, addresses))
                .unwrap_err()
                .kind()
        };

        assert_eq!(kind("!foo", vec![]), ErrorKind::InvalidId);
        assert_eq!(kind("", vec![]), ErrorKind::InvalidId);
        assert_eq!(kind("Mint", vec![]), ErrorKind::AlreadyExists);
        assert_eq!(kind("AllWithoutFriends", vec![]), ErrorKind::AlreadyExists);
        assert_eq!(kind(&addr('a'), vec![]), ErrorKind::AlreadyExists);
        assert_eq!(kind("x", vec![addr('a'), addr('a')]), ErrorKind::DuplicateAddresses);
        assert_eq!(kind("x", vec!["alice".to_string()]), ErrorKind::InvalidAddress);

        registry
            .create_address_list(&AddressList::whitelist("x", vec![]))
            .unwrap();
        assert_eq!(kind("x", vec![]), ErrorKind::AlreadyExists);

        // Only the successful create advanced the counter.
        assert_eq!(registry.next_address_list_id().unwrap(), 2);
    }

    #[test]
    fn test_resolution_keeps_requested_id() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);
        registry
            .create_address_list(&AddressList::whitelist("x", vec![addr('a')]))
            .unwrap();

        let inverted = registry.get_address_list_by_id("!(x)").unwrap();
        assert_eq!(inverted.list_id, "!(x)");
        assert!(!inverted.whitelist);
        assert!(!inverted.contains(&addr('a')));
    }

    #[test]
    fn test_unknown_and_tracker() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        let err = registry.get_address_list_by_id("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let tracker = registry.get_tracker_list_by_id("missing").unwrap();
        assert!(tracker.contains("missing"));
        assert!(!tracker.contains("other"));
    }

    #[test]
    fn test_mint_lists() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);

        assert!(registry.check_address("Mint", MINT_ADDRESS).unwrap());
        assert!(!registry.check_address("Mint", &addr('a')).unwrap());
        assert!(!registry.check_address("AllWithoutMint", MINT_ADDRESS).unwrap());
        assert!(registry.check_address("AllWithoutMint", &addr('a')).unwrap());
    }

    #[test]
    fn test_enumerate_by_prefix() {
        let store = MemoryStore::new();
        let validator = PrefixedHexValidator::new("bb");
        let registry = ListRegistry::new(&store, &validator);
        for id in ["teamB", "teamA", "other"] {
            registry
                .create_address_list(&AddressList::whitelist(id, vec![]))
                .unwrap();
        }

        let ids: Vec<String> = registry
            .address_lists("team")
            .unwrap()
            .into_iter()
            .map(|l| l.list_id)
            .collect();
        assert_eq!(ids, vec!["teamA", "teamB"]);
    }
}
