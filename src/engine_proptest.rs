#![cfg(test)]

// Property tests for the containers kept inside the crate so they can check
// table placement through the engine's internal accessors.

use crate::bucket_table::BucketTable;
use crate::engine::{DuplicatePolicy, HashEngine, Multi, Unique, GROW_LOAD_FACTOR};
use crate::error::ChainError;
use crate::hash_fn::HashFn;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    InsertSafely(usize, i32),
    Remove(usize),
    RemovePair(usize, i32),
    Find(usize),
    RemoveByHandle(usize),
    Iterate,
}

// Keys index into a small pool so operations keep hitting the same entries.
fn arb_scenario() -> impl Strategy<Value = (Vec<u32>, Vec<Op>)> {
    proptest::collection::vec(any::<u32>(), 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let val = 0i32..4;
        let op = prop_oneof![
            3 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => (idx.clone(), val.clone()).prop_map(|(i, v)| Op::InsertSafely(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            1 => (idx.clone(), val).prop_map(|(i, v)| Op::RemovePair(i, v)),
            1 => idx.clone().prop_map(Op::Find),
            1 => idx.prop_map(Op::RemoveByHandle),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn low_bits(k: &u32) -> u64 {
    (*k & 0x7) as u64
}

fn spread(k: &u32) -> u64 {
    (*k as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Structural invariants that must hold after every operation.
fn check_table<H, P>(e: &HashEngine<u32, i32, H, P>) -> Result<(), TestCaseError>
where
    H: HashFn<u32>,
    P: DuplicatePolicy,
{
    let t: &BucketTable<u32, i32> = e.table();
    prop_assert!(t.bucket_count().is_power_of_two());
    prop_assert_eq!(t.entry_count(), e.len());
    for i in 0..t.bucket_count() {
        for entry in t.chain(i).into_iter().flatten() {
            prop_assert_eq!(entry.hash(), e.hash_fn().hash(entry.key()));
            prop_assert_eq!(t.bucket_index(entry.hash()), i);
        }
    }
    prop_assert!(e.load_factor() < GROW_LOAD_FACTOR);
    prop_assert_eq!(e.iter().count(), e.len());
    Ok(())
}

// Property: unique engine is equivalent to std::collections::HashMap where
// inserts never overwrite.
// - `insert` fails exactly when the key is present; `insert_safely` reports
//   whether it stored.
// - `find` returns the value of the first successful insert.
// - `remove` is a no-op on absent keys.
// - Iteration yields exactly the model's pairs.
fn run_unique<H: HashFn<u32>>(hash_fn: H, pool: &[u32], ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut sut: HashEngine<u32, i32, H, Unique> = HashEngine::new(hash_fn);
    let mut model: HashMap<u32, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i];
                let already = model.contains_key(&k);
                match sut.insert(k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(dup) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(*dup.key(), k);
                    }
                }
            }
            Op::InsertSafely(i, v) => {
                let k = pool[i];
                let stored = sut.insert_safely(k, v);
                prop_assert_eq!(stored, !model.contains_key(&k));
                model.entry(k).or_insert(v);
            }
            Op::Remove(i) | Op::RemovePair(i, _) => {
                let k = pool[i];
                let removed = sut.remove_matching(&k, |_| true);
                prop_assert_eq!(removed, usize::from(model.remove(&k).is_some()));
            }
            Op::Find(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.find(&k).map(|e| *e.value()), model.get(&k).copied());
            }
            Op::RemoveByHandle(i) => {
                let k = pool[i];
                match sut.find_handle(&k) {
                    Some(h) => {
                        let e = sut.remove_by_handle(h).expect("fresh handle removes");
                        prop_assert_eq!(Some(e.value), model.remove(&k));
                        prop_assert_eq!(sut.remove_by_handle(h).err(), Some(ChainError::StaleHandle));
                    }
                    None => prop_assert!(!model.contains_key(&k)),
                }
            }
            Op::Iterate => {
                let seen: BTreeMap<u32, i32> = sut.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(seen.len(), sut.len(), "no key visited twice");
                let expected: BTreeMap<u32, i32> = model.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(seen, expected);
            }
        }
        prop_assert_eq!(sut.len(), model.len());
        check_table(&sut)?;
    }
    Ok(())
}

// Property: multi engine is equivalent to a multiset of (key, value) pairs.
// - Every insert stores; duplicates are preserved across rehashes.
// - Removal by key or by pair removes every matching occurrence.
fn run_multi<H: HashFn<u32>>(hash_fn: H, pool: &[u32], ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut sut: HashEngine<u32, i32, H, Multi> = HashEngine::new(hash_fn);
    let mut model: BTreeMap<(u32, i32), usize> = BTreeMap::new();
    let total = |m: &BTreeMap<(u32, i32), usize>| m.values().sum::<usize>();

    for op in ops {
        match op {
            Op::Insert(i, v) | Op::InsertSafely(i, v) => {
                let k = pool[i];
                prop_assert!(sut.insert_safely(k, v));
                *model.entry((k, v)).or_default() += 1;
            }
            Op::Remove(i) => {
                let k = pool[i];
                let expected: usize = model.range((k, i32::MIN)..=(k, i32::MAX)).map(|(_, n)| *n).sum();
                prop_assert_eq!(sut.remove_matching(&k, |_| true), expected);
                model.retain(|(mk, _), _| *mk != k);
            }
            Op::RemovePair(i, v) => {
                let k = pool[i];
                let expected = model.remove(&(k, v)).unwrap_or(0);
                prop_assert_eq!(sut.remove_matching(&k, |x| *x == v), expected);
            }
            Op::Find(i) => {
                let k = pool[i];
                let expected: usize = model.range((k, i32::MIN)..=(k, i32::MAX)).map(|(_, n)| *n).sum();
                prop_assert_eq!(sut.count_matching(&k, |_| true), expected);
                prop_assert_eq!(sut.contains(&k), expected > 0);
            }
            Op::RemoveByHandle(i) => {
                let k = pool[i];
                if let Some(h) = sut.find_handle(&k) {
                    let e = sut.remove_by_handle(h).expect("fresh handle removes");
                    let slot = model.get_mut(&(k, e.value)).expect("pair present in model");
                    *slot -= 1;
                    if *slot == 0 {
                        model.remove(&(k, e.value));
                    }
                }
            }
            Op::Iterate => {
                let mut seen: BTreeMap<(u32, i32), usize> = BTreeMap::new();
                for (k, v) in sut.iter() {
                    *seen.entry((*k, *v)).or_default() += 1;
                }
                prop_assert_eq!(&seen, &model);
            }
        }
        prop_assert_eq!(sut.len(), total(&model));
        check_table(&sut)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_unique_state_machine((pool, ops) in arb_scenario()) {
        run_unique(spread, &pool, ops)?;
    }

    #[test]
    fn prop_multi_state_machine((pool, ops) in arb_scenario()) {
        run_multi(spread, &pool, ops)?;
    }
}

// Same invariants under heavy collisions: at most eight distinct hashes, so
// chains grow long and equality decides every lookup.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_unique_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_unique(low_bits, &pool, ops)?;
    }

    #[test]
    fn prop_multi_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_multi(low_bits, &pool, ops)?;
    }
}
