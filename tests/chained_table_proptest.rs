// ChainedHashTable property tests over the public API.
//
// Property 1: resize preserves the key/value set and doubles capacity.
// Property 2: every chain holds only keys whose bucket index matches,
//             and chain lengths sum to len(), before and after resize.
use chained_table::{bucket_index, ChainedHashTable};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn contents(t: &ChainedHashTable) -> BTreeMap<String, String> {
    t.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn assert_placement(t: &ChainedHashTable) -> Result<(), TestCaseError> {
    let mut total = 0;
    for b in 0..t.capacity() {
        for (k, _) in t.chain(b) {
            prop_assert_eq!(bucket_index(k, t.capacity()), b);
            total += 1;
        }
    }
    prop_assert_eq!(total, t.len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_resize_preserves_entries(
        pairs in proptest::collection::vec(("[a-z0-9]{0,8}", "[a-z]{0,8}"), 0..100),
        capacity in 1usize..=16,
    ) {
        let mut t = ChainedHashTable::new(capacity).unwrap();
        let mut model = BTreeMap::new();
        for (k, v) in &pairs {
            t.insert(k, v);
            model.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(contents(&t), model.clone());
        assert_placement(&t)?;

        let t = t.resize();
        prop_assert_eq!(t.capacity(), capacity * 2);
        prop_assert_eq!(t.len(), model.len());
        prop_assert_eq!(contents(&t), model.clone());
        assert_placement(&t)?;
        for (k, v) in &model {
            prop_assert_eq!(t.retrieve(k), Some(v.as_str()));
        }
    }

    #[test]
    fn prop_hash_in_range(s in ".*", max in 1usize..10_000) {
        let i = bucket_index(&s, max);
        prop_assert!(i < max);
        prop_assert_eq!(i, bucket_index(&s, max));
    }
}
