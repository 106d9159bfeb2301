use chain_hashmap::{ChainedHashMap, TableConfig};
use proptest::prelude::*;

// Model operations on ChainedHashMap against hashbrown's map and compare
// observable state after every step.
proptest! {
    #[test]
    fn prop_matches_hashbrown_model(
        cap in 1usize..=16,
        lf in prop_oneof![Just(0.5f32), Just(0.75), Just(1.0)],
        ops in proptest::collection::vec((0u8..=3u8, 0u16..64u16, any::<i64>()), 1..200),
    ) {
        let mut m: ChainedHashMap<u16, i64> =
            ChainedHashMap::with_config(TableConfig::new(cap, lf)).unwrap();
        let mut model: hashbrown::HashMap<u16, i64> = hashbrown::HashMap::new();

        for (op, k, v) in ops {
            match op {
                // Place reports whether the key already existed.
                0 | 1 => {
                    let existed = model.insert(k, v).is_some();
                    prop_assert_eq!(m.place(k, v), existed);
                }
                // Remove reports presence.
                2 => {
                    prop_assert_eq!(m.remove(&k), model.remove(&k).is_some());
                }
                // Lookup agrees with the model.
                3 => {
                    prop_assert_eq!(m.get(&k), model.get(&k));
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(m.len(), model.len());
        }

        // Entries view yields exactly the model's pairs.
        let mut seen: Vec<(u16, i64)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<(u16, i64)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        seen.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);

        m.clear();
        prop_assert!(m.is_empty());
        for k in model.keys() {
            prop_assert!(!m.contains_key(k));
        }
    }
}
