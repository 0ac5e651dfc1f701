#![cfg(test)]

// Property tests for ChainedHashTable kept inside the crate so they can call
// `check_invariants` on the bucket/arena structure after every operation.

use crate::config::TableConfig;
use crate::table::ChainedHashTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations so shrinking moves toward earlier keys and shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Remove(usize),
    Retrieve(usize),
    Absent(String),
    Resize,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z_0-9]{0,6}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), "[a-z]{0,4}").prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Retrieve),
            1 => "[A-Z]{1,4}".prop_map(OpI::Absent),
            1 => Just(OpI::Resize),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model(
    mut sut: ChainedHashTable,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, String> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, &v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.retrieve(k).is_none());
            }
            OpI::Retrieve(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.retrieve(k), model.get(k).map(String::as_str));
            }
            OpI::Absent(k) => {
                // Pool keys are lowercase; uppercase keys are never present.
                let before = sut.len();
                prop_assert_eq!(sut.remove(&k), None);
                prop_assert_eq!(sut.len(), before);
            }
            OpI::Resize => {
                let capacity = sut.capacity();
                sut = sut.resize();
                prop_assert_eq!(sut.capacity(), capacity * 2);
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    let s: BTreeMap<_, _> = sut.iter().collect();
    let m: BTreeMap<_, _> = model
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    prop_assert_eq!(s, m);
    sut.destroy();
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// - insert returns the replaced value exactly when the key was present.
// - remove returns the stored value, then the key is gone; absent removes are no-ops.
// - resize doubles capacity and preserves the key/value set.
// - Structural invariants hold after every op (no cycles, every key in its
//   own bucket, keys unique, no orphaned arena entries).
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), capacity in 1usize..=8) {
        let sut = ChainedHashTable::new(capacity).unwrap();
        run_against_model(sut, &pool, ops)?;
    }
}

// Property: same model with automatic growth enabled; the load factor never
// exceeds the configured bound after an insert.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_auto_grow((pool, ops) in arb_scenario(), factor in 0.25f64..2.0) {
        let cfg = TableConfig::new(1).with_max_load_factor(factor);
        let sut = ChainedHashTable::with_config(cfg).unwrap();
        run_against_model(sut, &pool, ops)?;
    }

    #[test]
    fn prop_auto_grow_bounds_load(keys in proptest::collection::hash_set("[a-z]{1,8}", 1..64), factor in 0.25f64..2.0) {
        let cfg = TableConfig::new(1).with_max_load_factor(factor);
        let mut t = ChainedHashTable::with_config(cfg).unwrap();
        for k in &keys {
            t.insert(k, k);
            prop_assert!(t.load_factor() <= factor);
        }
        prop_assert_eq!(t.len(), keys.len());
        t.check_invariants();
    }
}
