//! The Keeper: address lists and permission checks over an injected store.
//!
//! The Keeper owns no state besides its configuration. Every operation reads
//! or writes through the host store, so callers control transactions by
//! choosing the store (for example a [`StagedStore`](issuance_kernel_store::StagedStore)
//! over their own backend).

use std::sync::Arc;

use issuance_kernel_core::{AddressValidator, PrefixedHexValidator, UintRange, U256};
use issuance_kernel_lists::{AddressList, ListRegistry, ListSource, ResolveMode};
use issuance_kernel_perms::{
    self as perms, ActionPermission, CollectionApproval, CollectionApprovalPermission,
    PermissionFamily, ResolvedApproval, TokenIdsActionPermission, UserIncomingApprovalPermission,
    UserOutgoingApprovalPermission,
};
use issuance_kernel_store::KvStore;

use crate::config::KeeperConfig;
use crate::error::Result;

/// The main Keeper struct.
pub struct Keeper<S: KvStore> {
    /// The host store.
    store: Arc<S>,
    /// Decides what counts as an address.
    validator: Arc<dyn AddressValidator>,
    /// Configuration.
    config: KeeperConfig,
}

impl<S: KvStore> Keeper<S> {
    /// Create a Keeper with the default address validator for `config`.
    pub fn new(store: S, config: KeeperConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a Keeper over a store shared with the host.
    pub fn with_shared_store(store: Arc<S>, config: KeeperConfig) -> Self {
        let validator = Arc::new(PrefixedHexValidator::new(config.address_prefix.clone()));
        Self {
            store,
            validator,
            config,
        }
    }

    /// Replace the address validator.
    pub fn with_validator(mut self, validator: impl AddressValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn validator(&self) -> &dyn AddressValidator {
        self.validator.as_ref()
    }

    /// A list registry borrowing this Keeper's store and validator.
    pub fn lists(&self) -> ListRegistry<'_, S> {
        ListRegistry::new(self.store.as_ref(), self.validator.as_ref())
            .with_namespaces(self.config.namespaces())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Address Lists
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate and store a new address list.
    pub fn create_address_list(&self, list: &AddressList) -> Result<()> {
        Ok(self.lists().create_address_list(list)?)
    }

    /// Resolve a list id: reserved, inline, stored, or an inversion of these.
    pub fn get_address_list_by_id(&self, list_id: &str) -> Result<AddressList> {
        Ok(self.lists().get_address_list_by_id(list_id)?)
    }

    /// Resolve a list id whose pieces are opaque aliases. Never `NotFound`.
    pub fn get_tracker_list_by_id(&self, list_id: &str) -> Result<AddressList> {
        Ok(self.lists().get_tracker_list_by_id(list_id)?)
    }

    /// Membership of `address` in the list named by `list_id`.
    pub fn check_addresses(&self, list_id: &str, address: &str) -> Result<bool> {
        Ok(self.lists().check_address(list_id, address)?)
    }

    /// Stored lists whose id starts with `prefix`.
    pub fn get_address_lists(&self, prefix: &str) -> Result<Vec<AddressList>> {
        Ok(self.lists().address_lists(prefix)?)
    }

    pub fn next_address_list_id(&self) -> Result<u64> {
        Ok(self.lists().next_address_list_id()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Approvals
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve an approval's lists and test the three parties against them.
    pub fn approval_matches(
        &self,
        from: &str,
        to: &str,
        initiated_by: &str,
        approval: &CollectionApproval,
    ) -> Result<bool> {
        let resolved = ResolvedApproval::resolve(approval, &self.lists())?;
        Ok(perms::approval_matches(from, to, initiated_by, &resolved))
    }

    pub fn validate_collection_approvals(
        &self,
        approvals: &[CollectionApproval],
    ) -> Result<Vec<ResolvedApproval>> {
        Ok(perms::validate_collection_approvals(approvals, &self.lists())?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Structural validation of one family's permission list.
    pub fn validate_permissions<P: PermissionFamily>(&self, permissions: &[P]) -> Result<()> {
        Ok(perms::validate_permissions(permissions)?)
    }

    /// Validate a transition between two permission lists of one family.
    pub fn validate_permissions_update<P: PermissionFamily>(
        &self,
        old: &[P],
        new: &[P],
    ) -> Result<()> {
        let lists = self.lists();
        perms::validate_permissions_update(old, new, &lists).map_err(|e| {
            tracing::debug!(
                family = P::FAMILY,
                code = e.kind().code(),
                "permission update rejected"
            );
            e.into()
        })
    }

    pub fn validate_action_permissions_update(
        &self,
        old: &[ActionPermission],
        new: &[ActionPermission],
    ) -> Result<()> {
        self.validate_permissions_update(old, new)
    }

    pub fn validate_token_ids_action_permissions_update(
        &self,
        old: &[TokenIdsActionPermission],
        new: &[TokenIdsActionPermission],
    ) -> Result<()> {
        self.validate_permissions_update(old, new)
    }

    pub fn validate_collection_approval_permissions_update(
        &self,
        old: &[CollectionApprovalPermission],
        new: &[CollectionApprovalPermission],
    ) -> Result<()> {
        self.validate_permissions_update(old, new)
    }

    pub fn validate_user_incoming_approval_permissions_update(
        &self,
        old: &[UserIncomingApprovalPermission],
        new: &[UserIncomingApprovalPermission],
    ) -> Result<()> {
        self.validate_permissions_update(old, new)
    }

    pub fn validate_user_outgoing_approval_permissions_update(
        &self,
        old: &[UserOutgoingApprovalPermission],
        new: &[UserOutgoingApprovalPermission],
    ) -> Result<()> {
        self.validate_permissions_update(old, new)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Runtime Gates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn check_action_permission(
        &self,
        permissions: &[ActionPermission],
        now: U256,
    ) -> Result<()> {
        Ok(perms::check_action_permission(permissions, now)?)
    }

    pub fn check_token_ids_action_permission(
        &self,
        permissions: &[TokenIdsActionPermission],
        token_ids: &[UintRange],
        now: U256,
    ) -> Result<()> {
        Ok(perms::check_token_ids_action_permission(permissions, token_ids, now)?)
    }

    pub fn check_collection_approval_permission(
        &self,
        permissions: &[CollectionApprovalPermission],
        approval: &CollectionApproval,
        now: U256,
    ) -> Result<()> {
        Ok(perms::check_collection_approval_permission(
            permissions,
            approval,
            now,
            &self.lists(),
        )?)
    }
}

impl<S: KvStore> ListSource for Keeper<S> {
    fn resolve(&self, list_id: &str, mode: ResolveMode) -> issuance_kernel_lists::Result<AddressList> {
        self.lists().resolve(list_id, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuance_kernel_core::{CoreError, ErrorKind, MINT_ADDRESS};
    use issuance_kernel_store::MemoryStore;

    /// Accepts any lowercase ascii name.
    struct NameValidator;

    impl AddressValidator for NameValidator {
        fn validate(&self, address: &str, allow_mint: bool) -> issuance_kernel_core::Result<()> {
            if address == MINT_ADDRESS && allow_mint {
                return Ok(());
            }
            if !address.is_empty() && address.bytes().all(|b| b.is_ascii_lowercase()) {
                return Ok(());
            }
            Err(CoreError::InvalidAddress {
                address: address.to_string(),
                reason: "not a name".to_string(),
            })
        }
    }

    #[test]
    fn test_custom_validator() {
        let keeper =
            Keeper::new(MemoryStore::new(), KeeperConfig::default()).with_validator(NameValidator);

        assert!(keeper.check_addresses("alice:bob", "alice").unwrap());
        assert!(!keeper.check_addresses("alice:bob", "charlie").unwrap());

        // A stored id that happens to be a valid name is taken as inline.
        let err = keeper
            .create_address_list(&AddressList::whitelist("friends", vec![]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        keeper
            .create_address_list(&AddressList::whitelist("Friends", vec!["alice".into()]))
            .unwrap();
        assert!(keeper.check_addresses("Friends", "alice").unwrap());
    }

    #[test]
    fn test_custom_namespaces() {
        let config = KeeperConfig {
            address_lists_namespace: "lists".to_string(),
            params_namespace: "meta".to_string(),
            ..KeeperConfig::default()
        };
        let keeper = Keeper::new(MemoryStore::new(), config);
        let alice = format!("bb{}", "a".repeat(40));
        keeper
            .create_address_list(&AddressList::whitelist("x", vec![alice]))
            .unwrap();

        assert!(keeper.store().get("lists", "x").unwrap().is_some());
        assert!(keeper.store().get("addressLists", "x").unwrap().is_none());
        assert_eq!(keeper.next_address_list_id().unwrap(), 2);
    }

    #[test]
    fn test_keeper_is_a_list_source() {
        let keeper = Keeper::new(MemoryStore::new(), KeeperConfig::default());
        let source: &dyn ListSource = &keeper;
        assert!(source.tracker_list("anything").unwrap().contains("anything"));
    }
}
