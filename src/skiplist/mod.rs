//! Probabilistic skip list.
//!
//! Ordered map with expected-logarithmic depth via randomized multi-level
//! forward links. Nodes live in a `Vec` arena and every forward pointer is a
//! `u32` arena index, so level-0 forms the owning chain and the upper levels
//! are plain non-owning shortcuts with no cycles to manage.
//!
//! A node's level is drawn once at insertion by flipping a fair coin until
//! tails (the classic geometric scheme, p = 0.5) and never changes. The
//! random source is a seedable [`StdRng`] injected at construction, so runs
//! are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

use crate::{check_parallel, IndexError, OrderedIndex, Result};

/// Absent forward pointer.
const NIL: u32 = u32::MAX;

/// The head pseudo-node always occupies arena slot 0.
const HEAD: u32 = 0;

/// Hard cap on `max_levels`; 2^32 keys would saturate the arena index first.
const LEVEL_CAP: usize = 32;

/// Seed used when the caller does not supply one.
const DEFAULT_SEED: u64 = 0x51B0_1157;

struct SkipNode<V> {
    key: u64,
    /// `None` only for the head slot and for removed slots, both of which
    /// are unreachable by `search`.
    value: Option<V>,
    /// `forward[i]` is the next node at level `i`; length is the node's
    /// drawn level + 1 (the head holds all `max_levels` slots).
    forward: Vec<u32>,
}

/// Per-level predecessors recorded on the way down; levels above the current
/// top stay at the head, exactly where a taller new node must splice in.
type Predecessors = SmallVec<[u32; LEVEL_CAP]>;

/// Randomized multi-level ordered map from `u64` keys to values.
///
/// `add` is a no-op when the key already exists (first write wins).
pub struct SkipList<V> {
    nodes: Vec<SkipNode<V>>,
    /// Highest level currently in use by any node.
    level: usize,
    max_levels: usize,
    len: usize,
    rng: StdRng,
}

impl<V> SkipList<V> {
    /// Create an empty list with an explicit level cap and RNG seed.
    ///
    /// Fails with [`IndexError::InvalidInput`] unless
    /// `1 <= max_levels <= 32`.
    pub fn new(max_levels: usize, seed: u64) -> Result<Self> {
        if max_levels == 0 || max_levels > LEVEL_CAP {
            return Err(IndexError::InvalidInput(format!(
                "max_levels must be in 1..={LEVEL_CAP}, got {max_levels}"
            )));
        }
        Ok(SkipList {
            nodes: vec![SkipNode {
                key: 0,
                value: None,
                forward: vec![NIL; max_levels],
            }],
            level: 0,
            max_levels,
            len: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Build a list from parallel key/value sequences with the default seed
    /// and `max_levels = ceil(log2(n))` clamped to [1, 32].
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch or when
    /// the key set is empty (no level count can be inferred; use
    /// [`from_pairs_with`] with an explicit `max_levels` instead).
    ///
    /// [`from_pairs_with`]: SkipList::from_pairs_with
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        Self::from_pairs_with(keys, values, None, DEFAULT_SEED)
    }

    /// Build a list with an explicit level cap and/or RNG seed.
    pub fn from_pairs_with(
        keys: &[u64],
        values: Vec<V>,
        max_levels: Option<usize>,
        seed: u64,
    ) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let max_levels = match max_levels {
            Some(levels) => levels,
            None => Self::default_levels(keys.len())?,
        };
        let mut list = SkipList::new(max_levels, seed)?;
        for (&key, value) in keys.iter().zip(values) {
            list.add(key, value);
        }
        Ok(list)
    }

    /// `ceil(log2(n))` clamped to [1, 32].
    fn default_levels(n: usize) -> Result<usize> {
        if n == 0 {
            return Err(IndexError::InvalidInput(
                "cannot infer max_levels from an empty key set".into(),
            ));
        }
        let estimate = (usize::BITS - (n - 1).leading_zeros()) as usize;
        Ok(estimate.clamp(1, LEVEL_CAP))
    }

    /// Flip a fair coin until tails; capped at `max_levels - 1`.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_levels - 1 && self.rng.gen_bool(0.5) {
            level += 1;
        }
        level
    }

    /// Walk from the head at the highest active level downward, recording at
    /// each level the last node whose key is below `key`. At level 0 the
    /// recorded node is the strict predecessor of `key`.
    fn find_predecessors(&self, key: u64) -> Predecessors {
        let mut update: Predecessors = smallvec![HEAD; self.max_levels];
        let mut current = HEAD;
        for level in (0..=self.level).rev() {
            loop {
                let next = self.nodes[current as usize].forward[level];
                if next != NIL && self.nodes[next as usize].key < key {
                    current = next;
                } else {
                    break;
                }
            }
            update[level] = current;
        }
        update
    }

    /// The node at `key`, if present: the level-0 successor of its strict
    /// predecessor on an exact key match.
    fn find(&self, key: u64) -> Option<u32> {
        let update = self.find_predecessors(key);
        let candidate = self.nodes[update[0] as usize].forward[0];
        (candidate != NIL && self.nodes[candidate as usize].key == key).then_some(candidate)
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        let node = self.find(key)?;
        self.nodes[node as usize].value.as_ref()
    }

    /// Insert `key` with `value`; no-op if the key is already present.
    pub fn add(&mut self, key: u64, value: V) {
        let update = self.find_predecessors(key);
        let at_key = self.nodes[update[0] as usize].forward[0];
        if at_key != NIL && self.nodes[at_key as usize].key == key {
            return;
        }

        let level = self.random_level();
        self.level = self.level.max(level);

        let index = self.nodes.len() as u32;
        let mut forward = vec![NIL; level + 1];
        for (i, slot) in forward.iter_mut().enumerate() {
            *slot = self.nodes[update[i] as usize].forward[i];
        }
        self.nodes.push(SkipNode {
            key,
            value: Some(value),
            forward,
        });
        for i in 0..=level {
            self.nodes[update[i] as usize].forward[i] = index;
        }
        self.len += 1;
    }

    /// Remove `key`, returning its value, or `None` if absent.
    ///
    /// The unlink walk stops at the first level whose forward pointer does
    /// not target the node: a node linked at level L is linked at every
    /// level below it, so nothing above can match either. The vacated arena
    /// slot stays allocated (and unreachable) until the list is dropped.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let update = self.find_predecessors(key);
        let target = self.nodes[update[0] as usize].forward[0];
        if target == NIL || self.nodes[target as usize].key != key {
            return None;
        }

        for level in 0..=self.level {
            let predecessor = update[level] as usize;
            if self.nodes[predecessor].forward[level] != target {
                break;
            }
            self.nodes[predecessor].forward[level] = self.nodes[target as usize].forward[level];
        }
        self.len -= 1;
        self.nodes[target as usize].value.take()
    }

    /// Replace the value stored for `key`; no-op if absent.
    pub fn update(&mut self, key: u64, value: V) {
        if let Some(node) = self.find(key) {
            self.nodes[node as usize].value = Some(value);
        }
    }

    /// Smallest key present: the head's immediate level-0 successor.
    pub fn min_key(&self) -> Result<u64> {
        let first = self.nodes[HEAD as usize].forward[0];
        if first == NIL {
            return Err(IndexError::EmptyStructure);
        }
        Ok(self.nodes[first as usize].key)
    }

    /// Largest key present: ride each level to its dead end, then drop a
    /// level, until level 0 is exhausted.
    pub fn max_key(&self) -> Result<u64> {
        let mut current = HEAD;
        for level in (0..=self.level).rev() {
            loop {
                let next = self.nodes[current as usize].forward[level];
                if next == NIL {
                    break;
                }
                current = next;
            }
        }
        if current == HEAD {
            return Err(IndexError::EmptyStructure);
        }
        Ok(self.nodes[current as usize].key)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterator over `(key, &value)` in ascending key order (the level-0
    /// chain).
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> {
        let mut current = self.nodes[HEAD as usize].forward[0];
        std::iter::from_fn(move || {
            if current == NIL {
                return None;
            }
            let node = &self.nodes[current as usize];
            current = node.forward[0];
            node.value.as_ref().map(|value| (node.key, value))
        })
    }

    /// Audit the structural invariants: every level is strictly ascending by
    /// key, and every node reachable at level L is also reachable at every
    /// level below L. Panics on the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        let mut below: Option<HashSet<u32>> = None;
        for level in 0..=self.level {
            let mut seen = HashSet::new();
            let mut previous_key = None;
            let mut current = self.nodes[HEAD as usize].forward[level];
            while current != NIL {
                let node = &self.nodes[current as usize];
                if let Some(previous) = previous_key {
                    assert!(
                        node.key > previous,
                        "level {level} not strictly ascending at key {}",
                        node.key
                    );
                }
                previous_key = Some(node.key);
                seen.insert(current);
                current = node.forward[level];
            }
            if let Some(below) = &below {
                assert!(
                    seen.is_subset(below),
                    "node linked at level {level} missing from level {}",
                    level - 1
                );
            } else {
                assert_eq!(seen.len(), self.len, "level 0 must link every key");
            }
            below = Some(seen);
        }
    }
}

impl<V> OrderedIndex<V> for SkipList<V> {
    fn search(&self, key: u64) -> Option<&V> {
        SkipList::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        SkipList::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        SkipList::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        SkipList::max_key(self)
    }
    fn len(&self) -> usize {
        SkipList::len(self)
    }
}
