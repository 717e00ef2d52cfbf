//! Set algebra on resolved lists.
//!
//! Lists are `(whitelist, addresses)` pairs over an unbounded universe, so
//! every result is again such a pair. Results are labelled with
//! [`AddressList::derived_id`].

use crate::list::AddressList;

/// Addresses that are members of both lists.
pub fn intersect(a: &AddressList, b: &AddressList) -> AddressList {
    let in_a = |x: &&String| a.addresses.contains(x);
    let in_b = |x: &&String| b.addresses.contains(x);

    let (whitelist, addresses): (bool, Vec<String>) = match (a.whitelist, b.whitelist) {
        (true, true) => (true, a.addresses.iter().filter(in_b).cloned().collect()),
        (true, false) => (true, a.addresses.iter().filter(|x| !in_b(x)).cloned().collect()),
        (false, true) => (true, b.addresses.iter().filter(|x| !in_a(x)).cloned().collect()),
        (false, false) => {
            let mut excluded = a.addresses.clone();
            excluded.extend(b.addresses.iter().filter(|x| !in_a(x)).cloned());
            (false, excluded)
        }
    };

    let list = AddressList::new(String::new(), addresses, whitelist);
    let id = list.derived_id();
    list.with_id(id)
}

/// Members of `a` that are not members of `b`.
pub fn remove(a: &AddressList, b: &AddressList) -> AddressList {
    intersect(a, &b.clone().inverted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UNIVERSE: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn arb_list() -> impl Strategy<Value = AddressList> {
        (any::<bool>(), prop::sample::subsequence(UNIVERSE.to_vec(), 0..=UNIVERSE.len())).prop_map(
            |(whitelist, members)| {
                AddressList::new(
                    "",
                    members.into_iter().map(String::from).collect(),
                    whitelist,
                )
            },
        )
    }

    #[test]
    fn test_whitelist_cases() {
        let ab = AddressList::whitelist("ab", vec!["a".into(), "b".into()]);
        let bc = AddressList::whitelist("bc", vec!["b".into(), "c".into()]);
        assert_eq!(intersect(&ab, &bc).addresses, vec!["b".to_string()]);
        assert_eq!(remove(&ab, &bc).addresses, vec!["a".to_string()]);
        assert_eq!(remove(&ab, &bc).list_id, "a");
    }

    #[test]
    fn test_blacklist_cases() {
        let not_a = AddressList::blacklist("", vec!["a".into()]);
        let not_b = AddressList::blacklist("", vec!["b".into()]);
        let both = intersect(&not_a, &not_b);
        assert!(!both.whitelist);
        assert_eq!(both.addresses, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(both.list_id, "AllWithouta:b");

        // Everyone minus everyone-but-a is just a.
        let only_a = remove(&AddressList::all(), &not_a);
        assert!(only_a.whitelist);
        assert_eq!(only_a.addresses, vec!["a".to_string()]);
    }

    #[test]
    fn test_remove_everything_is_empty() {
        assert!(remove(&AddressList::all(), &AddressList::all()).is_empty());
        assert!(remove(&AddressList::none(), &AddressList::all()).is_empty());
    }

    proptest! {
        #[test]
        fn test_algebra_agrees_pointwise(a in arb_list(), b in arb_list(), x in prop::sample::select(vec!["a", "c", "e", "z"])) {
            prop_assert_eq!(intersect(&a, &b).contains(x), a.contains(x) && b.contains(x));
            prop_assert_eq!(remove(&a, &b).contains(x), a.contains(x) && !b.contains(x));
        }
    }
}
