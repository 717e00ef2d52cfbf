//! Property tests for list resolution, projection and update validation.

use proptest::prelude::*;

use issuance_kernel::core::range;
use issuance_kernel::perms::{first_match_only, validate_update, UniversalPermission};
use issuance_kernel_testkit::generators::{
    time_split, token_ids_permissions, universal_permissions,
};
use issuance_kernel_testkit::{multi_party_addresses, TestFixture};

fn party_subset() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(multi_party_addresses(5), 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inversion_flips_and_restores(members in party_subset(), stored in any::<bool>()) {
        let fixture = TestFixture::new();
        let probes = multi_party_addresses(6);
        let id = if stored {
            let refs: Vec<&str> = members.iter().map(String::as_str).collect();
            fixture.create_whitelist("generated", &refs).unwrap();
            "generated".to_string()
        } else {
            members.join(":")
        };

        let plain = fixture.keeper.get_address_list_by_id(&id).unwrap();
        let once = fixture.keeper.get_address_list_by_id(&format!("!({id})")).unwrap();
        let twice = fixture.keeper.get_address_list_by_id(&format!("!(!({id}))")).unwrap();

        prop_assert_eq!(once.whitelist, !plain.whitelist);
        prop_assert_eq!(&once.list_id, &format!("!({id})"));
        for probe in &probes {
            prop_assert_eq!(once.contains(probe), !plain.contains(probe));
            prop_assert_eq!(twice.contains(probe), plain.contains(probe));
        }
    }

    #[test]
    fn all_without_is_the_complement(excluded in party_subset()) {
        let fixture = TestFixture::new();
        let id = format!("AllWithout{}", excluded.join(":"));
        for probe in multi_party_addresses(6) {
            let member = fixture.keeper.check_addresses(&id, &probe).unwrap();
            prop_assert_eq!(member, !excluded.contains(&probe));
        }
    }

    #[test]
    fn projection_is_disjoint_and_exact(perms in universal_permissions(4)) {
        let projected = first_match_only(&perms);
        let originals: Vec<_> = perms.iter().map(UniversalPermission::key).collect();

        for (i, a) in projected.iter().enumerate() {
            for b in &projected[i + 1..] {
                prop_assert!(!a.key.overlaps(&b.key));
            }
            prop_assert!(a.key.subtract(&originals[a.source_index]).is_empty());
        }

        // Nothing an entry covered is lost.
        let pieces: Vec<_> = projected.iter().map(|c| c.key.clone()).collect();
        for key in &originals {
            prop_assert!(key.subtract_all(&pieces).is_empty());
        }
    }

    #[test]
    fn update_is_reflexive(perms in universal_permissions(4)) {
        prop_assert!(validate_update(&perms, &perms).is_ok());
    }

    #[test]
    fn unlocking_a_forbidden_time_weakens(perms in token_ids_permissions()) {
        prop_assume!(!perms.is_empty());
        prop_assume!(!perms[0].permanently_forbidden_times.is_empty());

        let fixture = TestFixture::new();
        let mut new = perms.clone();
        let forbidden = std::mem::take(&mut new[0].permanently_forbidden_times);
        new[0].permanently_permitted_times =
            range::union(&new[0].permanently_permitted_times, &forbidden);

        let err = fixture
            .keeper
            .validate_token_ids_action_permissions_update(&perms, &new)
            .unwrap_err();
        prop_assert_eq!(err.code(), "PERMISSION_WEAKENS");
    }

    #[test]
    fn unhandled_times_are_free(
        perms in universal_permissions(4),
        extras in prop::collection::vec(time_split(64..128), 4),
    ) {
        let new: Vec<UniversalPermission> = perms
            .iter()
            .zip(extras.iter().cycle())
            .map(|(perm, (permitted, forbidden))| UniversalPermission {
                permanently_permitted_times: range::union(&perm.permanently_permitted_times, permitted),
                permanently_forbidden_times: range::union(&perm.permanently_forbidden_times, forbidden),
                ..perm.clone()
            })
            .collect();
        prop_assert!(validate_update(&perms, &new).is_ok());
    }

    #[test]
    fn unhandled_entries_accept_anything(
        perms in universal_permissions(4),
        new in universal_permissions(4),
    ) {
        let unhandled: Vec<UniversalPermission> = perms
            .into_iter()
            .map(|perm| UniversalPermission {
                permanently_permitted_times: vec![],
                permanently_forbidden_times: vec![],
                ..perm
            })
            .collect();
        prop_assert!(validate_update(&unhandled, &new).is_ok());
    }
}
