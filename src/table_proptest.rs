#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// arena and bucket invariants that are not part of the public surface.

use crate::table::ChainedHashMap;
use crate::TableConfig;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so failures shrink towards earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Place(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

// Load factors as whole percentages, so the expected threshold can be
// computed exactly in integers. Includes values with no exact binary form.
fn arb_config() -> impl Strategy<Value = (TableConfig, usize)> {
    let percent = proptest::sample::select(vec![25usize, 30, 50, 60, 70, 75, 90, 100]);
    (1usize..=10, percent)
        .prop_map(|(cap, pct)| (TableConfig::new(cap, pct as f32 / 100.0), pct))
}

fn arb_scenario() -> impl Strategy<Value = ((TableConfig, usize), Vec<String>, Vec<OpI>)> {
    (arb_config(), proptest::collection::vec("[a-z]{0,4}", 1..=24)).prop_flat_map(
        |(config, pool)| {
            let idx = proptest::sample::select((0..pool.len()).collect::<Vec<_>>());
            let op = prop_oneof![
                6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Place(i, v)),
                3 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Get),
                1 => "[a-z]{0,4}".prop_map(OpI::Contains),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Clear),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..120)
                .prop_map(move |ops| (config, pool.clone(), ops))
        },
    )
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `place` reports pre-existence exactly as the model does; `get` sees the last value.
// - `remove` reports presence and drops exactly one entry.
// - `len` equals the model size, the arena size and the sum of chain lengths.
// - every node lives in the bucket selected by its cached hash.
// - `threshold == floor(load_factor * capacity)` in exact decimal terms.
// - `len <= threshold` after every operation; capacity only doubles from its start.
// - `iter` yields each live pair exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(((config, pct), pool, ops) in arb_scenario()) {
        let mut sut: ChainedHashMap<Key, i32> = ChainedHashMap::with_config(config).unwrap();
        let mut model: HashMap<Key, i32> = HashMap::new();
        let initial_capacity = config.initial_capacity;

        for op in ops {
            match op {
                OpI::Place(i, v) => {
                    let k = Key(pool[i].clone());
                    let existed = model.insert(k.clone(), v).is_some();
                    prop_assert_eq!(sut.place(k, v), existed);
                }
                OpI::Remove(i) => {
                    let removed = model.remove(pool[i].as_str()).is_some();
                    prop_assert_eq!(sut.remove(pool[i].as_str()), removed);
                    prop_assert!(!sut.contains_key(pool[i].as_str()));
                }
                OpI::Get(i) => {
                    prop_assert_eq!(sut.get(pool[i].as_str()), model.get(pool[i].as_str()));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(s.as_str()));
                }
                OpI::Mutate(i, d) => {
                    let key = pool[i].as_str();
                    match (sut.get_mut(key), model.get_mut(key)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", a, b),
                    }
                }
                OpI::Clear => {
                    let capacity = sut.capacity();
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), capacity);
                }
                OpI::Iterate => {
                    let seen: BTreeMap<Key, i32> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(sut.iter().count(), seen.len());
                    let expected: BTreeMap<Key, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(seen, expected);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.arena_len(), sut.len());
            prop_assert_eq!(sut.chain_lengths().iter().sum::<usize>(), sut.len());
            prop_assert!(sut.nodes_in_home_buckets());
            prop_assert_eq!(sut.threshold(), pct * sut.capacity() / 100);
            prop_assert!(sut.len() <= sut.threshold());
            prop_assert!(sut.capacity() >= initial_capacity);
            prop_assert!((sut.capacity() / initial_capacity).is_power_of_two());
            prop_assert_eq!(sut.capacity() % initial_capacity, 0);
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
    }
}

// Property: the keys and values views agree with the entries view, pairwise.
proptest! {
    #[test]
    fn prop_views_align(pairs in proptest::collection::vec((any::<u16>(), any::<u8>()), 0..200)) {
        let sut: ChainedHashMap<u16, u8> = pairs.iter().copied().collect();
        let entries: Vec<(u16, u8)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
        let keys: Vec<u16> = sut.keys().copied().collect();
        let values: Vec<u8> = sut.values().copied().collect();
        prop_assert_eq!(entries.len(), sut.len());
        prop_assert_eq!(keys, entries.iter().map(|p| p.0).collect::<Vec<_>>());
        prop_assert_eq!(values, entries.iter().map(|p| p.1).collect::<Vec<_>>());
    }
}
