#![cfg(test)]

// Property tests for HashTable kept inside the crate so the constant-hasher
// variants can inspect capacity behavior without extra public API.

use crate::hash_table::{CollisionPolicy, HashTable, InsertError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Get),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Folds every key into a handful of hashes so chains and probe clusters
// stay long.
#[derive(Clone, Default)]
struct NarrowBuildHasher;
struct NarrowHasher(u64);
impl BuildHasher for NarrowBuildHasher {
    type Hasher = NarrowHasher;
    fn build_hasher(&self) -> Self::Hasher {
        NarrowHasher(0)
    }
}
impl Hasher for NarrowHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_add(b as u64);
        }
    }
    fn finish(&self) -> u64 {
        self.0 % 3
    }
}

// Drives a table and a std HashMap model through the same operations.
// Invariants after every step:
// - insert reports the replaced value exactly when the model had the key;
//   under open addressing a new key fails iff the table is at capacity,
//   and a failed insert leaves the table unchanged.
// - get/remove agree with the model; iteration yields the model's key set.
// - len/is_empty parity with the model.
fn run_against_model<S: BuildHasher>(
    mut sut: HashTable<String, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let capacity = sut.capacity();
    let bounded = sut.policy() == CollisionPolicy::OpenAddressing;

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let res = sut.insert(k.clone(), v);
                let present = model.contains_key(&k);
                if bounded && !present && model.len() == capacity {
                    prop_assert_eq!(res, Err(InsertError::CapacityExceeded { capacity }));
                } else {
                    let prev = model.insert(k, v);
                    prop_assert_eq!(res, Ok(prev));
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove_entry(k.as_str()), model.remove_entry(k));
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                prop_assert_eq!(sut.contains_key(k.as_str()), model.contains_key(k));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k.as_str()) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.iter().count(), model.len());
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // Every key the model holds must still be reachable.
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k.as_str()), Some(v));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_chaining_matches_model((pool, ops) in arb_scenario(), buckets in 1usize..8) {
        let sut: HashTable<String, i32> = HashTable::with_capacity(buckets, CollisionPolicy::Chaining);
        run_against_model(sut, &pool, ops)?;
    }

    #[test]
    fn prop_open_addressing_matches_model((pool, ops) in arb_scenario(), buckets in 1usize..16) {
        let sut: HashTable<String, i32> = HashTable::with_capacity(buckets, CollisionPolicy::OpenAddressing);
        run_against_model(sut, &pool, ops)?;
    }

    #[test]
    fn prop_chaining_with_collisions((pool, ops) in arb_scenario(), buckets in 1usize..8) {
        let sut = HashTable::with_capacity_and_hasher(buckets, CollisionPolicy::Chaining, NarrowBuildHasher);
        run_against_model(sut, &pool, ops)?;
    }

    // Back-shift deletion under heavy clustering: few distinct hashes, small
    // tables, removals interleaved with inserts.
    #[test]
    fn prop_open_addressing_with_collisions((pool, ops) in arb_scenario(), buckets in 1usize..16) {
        let sut = HashTable::with_capacity_and_hasher(buckets, CollisionPolicy::OpenAddressing, NarrowBuildHasher);
        run_against_model(sut, &pool, ops)?;
    }
}
