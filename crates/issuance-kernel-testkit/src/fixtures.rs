//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use issuance_kernel::{AddressList, Keeper, KeeperConfig, Result};
use issuance_kernel_core::Keypair;
use issuance_kernel_store::MemoryStore;

/// Seeds of the three named parties.
pub const ALICE_SEED: [u8; 32] = [0xA1; 32];
pub const BOB_SEED: [u8; 32] = [0xB0; 32];
pub const CHARLIE_SEED: [u8; 32] = [0xC4; 32];

/// A Keeper over a memory store plus three named parties.
pub struct TestFixture {
    pub keeper: Keeper<MemoryStore>,
    pub alice: String,
    pub bob: String,
    pub charlie: String,
}

impl TestFixture {
    /// Create a fixture with deterministic parties.
    pub fn new() -> Self {
        Self::with_seeds(ALICE_SEED, BOB_SEED, CHARLIE_SEED)
    }

    /// Create a fixture with freshly generated parties.
    pub fn random() -> Self {
        Self::with_keypairs(Keypair::generate(), Keypair::generate(), Keypair::generate())
    }

    pub fn with_seeds(alice: [u8; 32], bob: [u8; 32], charlie: [u8; 32]) -> Self {
        Self::with_keypairs(
            Keypair::from_seed(&alice),
            Keypair::from_seed(&bob),
            Keypair::from_seed(&charlie),
        )
    }

    pub fn with_keypairs(alice: Keypair, bob: Keypair, charlie: Keypair) -> Self {
        let config = KeeperConfig::default();
        let prefix = config.address_prefix.clone();
        Self {
            alice: alice.address(&prefix),
            bob: bob.address(&prefix),
            charlie: charlie.address(&prefix),
            keeper: Keeper::new(MemoryStore::new(), config),
        }
    }

    /// Store a whitelist of the given addresses under `list_id`.
    pub fn create_whitelist(&self, list_id: &str, addresses: &[&str]) -> Result<AddressList> {
        let list = AddressList::whitelist(
            list_id,
            addresses.iter().map(|a| a.to_string()).collect(),
        );
        self.keeper.create_address_list(&list)?;
        Ok(list)
    }

    /// Replace `{alice}`, `{bob}` and `{charlie}` in `template`.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{alice}", &self.alice)
            .replace("{bob}", &self.bob)
            .replace("{charlie}", &self.charlie)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Addresses of `count` parties. Party `i` is seeded with the little-endian
/// bytes of `i`, so every index gets its own address.
pub fn multi_party_addresses(count: usize) -> Vec<String> {
    let prefix = KeeperConfig::default().address_prefix;
    (0..count)
        .map(|i| {
            let index = i.to_le_bytes();
            let mut seed = [0u8; 32];
            seed[..index.len()].copy_from_slice(&index);
            Keypair::from_seed(&seed).address(&prefix)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuance_kernel_core::AddressValidator;

    #[test]
    fn test_parties_are_distinct_and_stable() {
        let a = TestFixture::new();
        let b = TestFixture::new();
        assert_eq!(a.alice, b.alice);
        assert_ne!(a.alice, a.bob);
        assert_ne!(a.bob, a.charlie);
    }

    #[test]
    fn test_parties_are_valid_addresses() {
        let fixture = TestFixture::random();
        for party in [&fixture.alice, &fixture.bob, &fixture.charlie] {
            assert!(fixture.keeper.validator().is_valid(party, false));
        }
    }

    #[test]
    fn test_many_parties_are_distinct() {
        let addresses = multi_party_addresses(300);
        let unique: std::collections::HashSet<_> = addresses.iter().collect();
        assert_eq!(unique.len(), 300);
        assert_ne!(addresses[1], addresses[257]);
    }

    #[test]
    fn test_create_whitelist() {
        let fixture = TestFixture::new();
        let bob = fixture.bob.clone();
        fixture.create_whitelist("pair", &[fixture.alice.as_str(), bob.as_str()]).unwrap();
        assert!(fixture.keeper.check_addresses("pair", &bob).unwrap());
        assert!(!fixture.keeper.check_addresses("pair", &fixture.charlie).unwrap());
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_addresses(3);
        assert_ne!(parties[0], parties[1]);
        assert_ne!(parties[1], parties[2]);
    }
}
