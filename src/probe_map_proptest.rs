#![cfg(test)]

// Property tests for ProbeMap kept inside the crate so they can inject the
// deterministic test hashers without a feature gate.

use crate::error::{Error, InsertError};
use crate::hashers::{ConstBuildHasher, IdentityBuildHasher};
use crate::probe_map::{ProbeMap, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

#[derive(Clone, Debug)]
enum Op<K> {
    Put(K, i32),
    PutNull(i32),
    Get(K),
    Contains(K),
    Remove(K),
    Clear,
}

fn arb_op<K, St>(key: St) -> impl Strategy<Value = Op<K>>
where
    K: Clone + Debug + 'static,
    St: Strategy<Value = K> + Clone + 'static,
{
    prop_oneof![
        4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        1 => any::<i32>().prop_map(Op::PutNull),
        2 => key.clone().prop_map(Op::Get),
        2 => key.clone().prop_map(Op::Contains),
        3 => key.prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

// Keys drawn from a small pool so duplicates and removals of present keys
// are common.
fn arb_string_ops() -> impl Strategy<Value = Vec<Op<String>>> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        proptest::collection::vec(arb_op(proptest::sample::select(pool)), 1..80)
    })
}

// Small integers under the identity hasher: homes are `k % capacity`, so
// chains collide and wrap constantly.
fn arb_int_ops() -> impl Strategy<Value = Vec<Op<u32>>> {
    proptest::collection::vec(arb_op(0u32..48), 1..120)
}

// State-machine equivalence against std::collections::HashMap.
// After every op:
// - `len`/`is_empty` match the model.
// - Load factor is below the threshold and capacity never shrinks.
// - Every model entry is readable with its value.
fn check_against_model<K, S>(
    mut sut: ProbeMap<K, i32, S>,
    ops: Vec<Op<K>>,
) -> Result<(), TestCaseError>
where
    K: Clone + Debug + Eq + Hash,
    S: BuildHasher,
{
    let mut model: HashMap<K, i32> = HashMap::new();

    for op in ops {
        let capacity_before = sut.capacity();
        match op {
            Op::Put(k, v) => {
                let already = model.contains_key(&k);
                match sut.put(k.clone(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "put must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(e) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(e, Error::InvalidArgument(InsertError::DuplicateKey));
                    }
                }
            }
            Op::PutNull(v) => {
                prop_assert_eq!(
                    sut.put(None::<K>, v),
                    Err(Error::InvalidArgument(InsertError::NullKey))
                );
            }
            Op::Get(k) => match model.get(&k) {
                Some(v) => prop_assert_eq!(sut.get(&k), Ok(v)),
                None => prop_assert_eq!(sut.get(&k), Err(Error::KeyNotFound)),
            },
            Op::Contains(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
            Op::Remove(k) => match model.remove(&k) {
                Some(v) => {
                    prop_assert_eq!(sut.remove(&k), Ok(v));
                    prop_assert!(!sut.contains_key(&k));
                }
                None => prop_assert_eq!(sut.remove(&k), Err(Error::KeyNotFound)),
            },
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity_before);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() < MAX_LOAD_FACTOR);
        prop_assert!(sut.capacity() >= capacity_before);
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Ok(v));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine(ops in arb_string_ops(), capacity in 1usize..=16) {
        check_against_model(ProbeMap::with_capacity(capacity), ops)?;
    }

    // Worst case: every key shares one probe chain.
    #[test]
    fn prop_state_machine_with_collisions(ops in arb_string_ops(), capacity in 1usize..=16) {
        check_against_model(ProbeMap::with_capacity_and_hasher(capacity, ConstBuildHasher), ops)?;
    }

    #[test]
    fn prop_state_machine_with_wrapping_chains(ops in arb_int_ops(), capacity in 1usize..=8) {
        check_against_model(ProbeMap::with_capacity_and_hasher(capacity, IdentityBuildHasher), ops)?;
    }

    // Property: however many growths a batch of puts triggers, every key keeps
    // its value and capacity is the initial capacity times a power of two.
    #[test]
    fn prop_growth_preserves_mappings(
        keys in proptest::collection::btree_set(any::<u64>(), 1..300),
        capacity in 1usize..=8,
    ) {
        let mut m: ProbeMap<u64, u64> = ProbeMap::with_capacity(capacity);
        for &k in &keys {
            m.put(k, k.wrapping_mul(31)).unwrap();
        }
        prop_assert_eq!(m.len(), keys.len());
        prop_assert_eq!(m.capacity() % capacity, 0);
        prop_assert!((m.capacity() / capacity).is_power_of_two());
        for &k in &keys {
            let want = k.wrapping_mul(31);
            prop_assert_eq!(m.get(&k), Ok(&want));
        }
    }

    // Property: removing a subset leaves exactly the complement reachable,
    // including keys whose chains ran through the removed slots.
    #[test]
    fn prop_removal_keeps_complement(
        keys in proptest::collection::btree_set(0u32..200, 1..60),
        mask in proptest::collection::vec(any::<bool>(), 60),
    ) {
        let mut m: ProbeMap<u32, u32, IdentityBuildHasher> =
            ProbeMap::with_capacity_and_hasher(4, IdentityBuildHasher);
        for &k in &keys {
            m.put(k, k).unwrap();
        }
        let removed: BTreeSet<u32> = keys
            .iter()
            .zip(mask.iter())
            .filter(|(_, gone)| **gone)
            .map(|(&k, _)| k)
            .collect();
        for k in &removed {
            prop_assert_eq!(m.remove(k), Ok(*k));
        }
        for k in &keys {
            if removed.contains(k) {
                prop_assert!(!m.contains_key(k));
            } else {
                prop_assert_eq!(m.get(k), Ok(k));
            }
        }
        prop_assert_eq!(m.len(), keys.len() - removed.len());
    }
}
