//! Model-based property tests: every structure is driven alongside a
//! `BTreeMap` reference model and its structural invariants are audited
//! after each mutation.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::{AvlTree, HashIndex, Lat, OrderedIndex, RadixTrie, SkipList, SortedArray};

#[derive(Debug, Clone)]
enum Op {
    Add(u64, u64),
    Remove(u64),
    Search(u64),
}

/// A small key space forces duplicate adds, removes of present keys, and
/// collisions between operations.
fn ops_strategy(key_space: u64) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0..key_space, any::<u64>()).prop_map(|(k, v)| Op::Add(k, v)),
            (0..key_space).prop_map(Op::Remove),
            (0..key_space).prop_map(Op::Search),
        ],
        1..300,
    )
}

/// First-write-wins model insert.
fn model_add(model: &mut BTreeMap<u64, u64>, key: u64, value: u64) {
    model.entry(key).or_insert(value);
}

fn assert_matches_model<I: OrderedIndex<u64>>(index: &I, model: &BTreeMap<u64, u64>) {
    assert_eq!(index.len(), model.len());
    match model.keys().next() {
        Some(&min) => {
            assert_eq!(index.min_key().unwrap(), min);
            assert_eq!(
                index.max_key().unwrap(),
                *model.keys().next_back().unwrap_or(&min)
            );
        }
        None => {
            assert!(index.min_key().is_err());
            assert!(index.max_key().is_err());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_avl_matches_model(ops in ops_strategy(256)) {
        let mut tree: AvlTree<u64> = AvlTree::new();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    tree.add(key, value);
                    model_add(&mut model, key, value);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(key), model.remove(&key));
                }
                Op::Search(key) => {
                    prop_assert_eq!(tree.search(key), model.get(&key));
                }
            }
            tree.check_invariants();
        }

        assert_matches_model(&tree, &model);
        // In-order enumeration is strictly ascending and matches the model.
        let flat: Vec<(u64, u64)> = tree.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(u64, u64)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn prop_skiplist_matches_model(ops in ops_strategy(256), seed in any::<u64>()) {
        let mut list: SkipList<u64> = SkipList::new(12, seed).unwrap();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    list.add(key, value);
                    model_add(&mut model, key, value);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(list.remove(key), model.remove(&key));
                }
                Op::Search(key) => {
                    prop_assert_eq!(list.search(key), model.get(&key));
                }
            }
            list.check_invariants();
        }

        assert_matches_model(&list, &model);
        let flat: Vec<(u64, u64)> = list.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(u64, u64)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn prop_lat_matches_model(pairs in prop::collection::vec((0u64..256, any::<u64>()), 1..200)) {
        // Keys stay inside the default 4^4 capacity so digit paths do not
        // alias and min/max stay comparable to the model. The leaf map
        // overwrites duplicates, so the model uses plain insert.
        let mut trie: Lat<u64> = Lat::new(4, 4).unwrap();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for &(key, value) in &pairs {
            trie.add(key, value);
            model.insert(key, value);
        }

        assert_matches_model(&trie, &model);
        for (&key, value) in &model {
            prop_assert_eq!(trie.search(key), Some(value));
        }
        prop_assert_eq!(trie.search(300), None);
    }

    #[test]
    fn prop_radix_matches_model(pairs in prop::collection::vec((100u64..1000, any::<u64>()), 1..200)) {
        // All keys are three digits in base 10, where digit-wise min/max
        // descent agrees with numeric order.
        let mut trie: RadixTrie<u64> = RadixTrie::new(10).unwrap();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for &(key, value) in &pairs {
            trie.add(key, value);
            model_add(&mut model, key, value);
        }

        assert_matches_model(&trie, &model);
        for (&key, value) in &model {
            prop_assert_eq!(trie.search(key), Some(value));
        }
    }

    #[test]
    fn prop_baselines_match_model(ops in ops_strategy(256)) {
        let mut array: SortedArray<u64> = SortedArray::new();
        let mut hash: HashIndex<u64> = HashIndex::new();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    array.add(key, value);
                    hash.add(key, value);
                    model_add(&mut model, key, value);
                }
                Op::Remove(key) => {
                    let expected = model.remove(&key);
                    prop_assert_eq!(array.remove(key), expected);
                    prop_assert_eq!(hash.remove(key), expected);
                }
                Op::Search(key) => {
                    prop_assert_eq!(array.search(key), model.get(&key));
                    prop_assert_eq!(hash.search(key), model.get(&key));
                }
            }
        }

        assert_matches_model(&array, &model);
        assert_matches_model(&hash, &model);
    }

    #[test]
    fn prop_sorted_array_range_matches_model(
        pairs in prop::collection::vec((0u64..128, any::<u64>()), 1..100),
        start in 0u64..128,
        width in 0u64..64,
    ) {
        let mut array: SortedArray<u64> = SortedArray::new();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();
        for &(key, value) in &pairs {
            array.add(key, value);
            model_add(&mut model, key, value);
        }

        let end = start + width;
        let expected: Vec<u64> = model.range(start..=end).map(|(_, &v)| v).collect();
        prop_assert_eq!(array.range_query(start, end), expected.as_slice());
    }
}
