//! Adaptive radix trie.
//!
//! Digit paths carry no padding: a key's depth is exactly the number of
//! base-`radix` digits needed to represent it, so key 0 has an empty path
//! and lives at the root. The radix is chosen once at construction, either
//! supplied or inferred as `round(sqrt(median(keys)))`, which keeps depth
//! proportional to the spread of the actual key distribution instead of a
//! fixed worst case.
//!
//! Min/max descend digit by digit, which agrees with numeric key order when
//! the compared keys have the same digit count (longer keys are numerically
//! larger but sit deeper, not further right). Key sets that straddle a power
//! of the radix trade that accuracy for the shallower unpadded layout.

use std::collections::BTreeMap;

use crate::digits;
use crate::{check_parallel, IndexError, OrderedIndex, Result};

struct RadixNode<V> {
    /// The value for the key whose digit path ends here, if any.
    value: Option<V>,
    children: BTreeMap<u64, RadixNode<V>>,
}

impl<V> RadixNode<V> {
    fn new() -> Self {
        RadixNode {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

/// Variable-depth digit trie from `u64` keys to values.
///
/// `add` is a no-op when a value already occupies the target node (first
/// write wins).
pub struct RadixTrie<V> {
    root: RadixNode<V>,
    radix: u64,
    len: usize,
}

impl<V> RadixTrie<V> {
    /// Create an empty trie with an explicit radix.
    ///
    /// Fails with [`IndexError::InvalidInput`] unless `radix >= 2` (a radix
    /// below 2 cannot decompose keys).
    pub fn new(radix: u64) -> Result<Self> {
        if radix < 2 {
            return Err(IndexError::InvalidInput(format!(
                "radix must be at least 2, got {radix}"
            )));
        }
        Ok(RadixTrie {
            root: RadixNode::new(),
            radix,
            len: 0,
        })
    }

    /// Build a trie with the radix inferred from the key distribution as
    /// `round(sqrt(median(keys)))`, clamped to at least 2.
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch or when
    /// the key set is empty (no radix can be inferred; use [`with_radix`]
    /// instead).
    ///
    /// [`with_radix`]: RadixTrie::with_radix
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        check_parallel(keys, values.len())?;
        Self::with_radix(keys, values, Self::infer_radix(keys)?)
    }

    /// Build a trie with an explicit radix.
    pub fn with_radix(keys: &[u64], values: Vec<V>, radix: u64) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let mut trie = RadixTrie::new(radix)?;
        for (&key, value) in keys.iter().zip(values) {
            trie.add(key, value);
        }
        Ok(trie)
    }

    /// `round(sqrt(median(keys)))`, clamped to at least 2. The median of an
    /// even-length set is the mean of the two middle keys.
    fn infer_radix(keys: &[u64]) -> Result<u64> {
        if keys.is_empty() {
            return Err(IndexError::InvalidInput(
                "cannot infer radix from an empty key set".into(),
            ));
        }
        let mut sorted = keys.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };
        Ok((median.sqrt().round() as u64).max(2))
    }

    /// The radix fixed at construction.
    pub fn radix(&self) -> u64 {
        self.radix
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        let mut node = &self.root;
        for &digit in &digits::adaptive(key, self.radix) {
            node = node.children.get(&digit)?;
        }
        node.value.as_ref()
    }

    /// Insert `key` with `value`, creating path nodes lazily; no-op if the
    /// target node already holds a value.
    pub fn add(&mut self, key: u64, value: V) {
        let mut node = &mut self.root;
        for &digit in &digits::adaptive(key, self.radix) {
            node = node.children.entry(digit).or_insert_with(RadixNode::new);
        }
        if node.value.is_none() {
            node.value = Some(value);
            self.len += 1;
        }
    }

    /// Smallest key present: depth-first, preferring the smallest child
    /// digit, returning the first value-bearing node in pre-order. The
    /// root's own value (key 0) is therefore found before anything else.
    pub fn min_key(&self) -> Result<u64> {
        fn descend<V>(node: &RadixNode<V>, radix: u64, prefix: u64) -> Option<u64> {
            if node.value.is_some() {
                return Some(prefix);
            }
            node.children
                .iter()
                .find_map(|(&digit, child)| descend(child, radix, prefix * radix + digit))
        }
        descend(&self.root, self.radix, 0).ok_or(IndexError::EmptyStructure)
    }

    /// Largest key present: follow the largest child digit until a node with
    /// no children, accumulating `prefix * radix + digit` along the way.
    ///
    /// A childless node is always the terminal of some inserted key, so it
    /// necessarily holds a value.
    pub fn max_key(&self) -> Result<u64> {
        if self.len == 0 {
            return Err(IndexError::EmptyStructure);
        }
        let mut node = &self.root;
        let mut key = 0u64;
        while let Some((&digit, child)) = node.children.last_key_value() {
            key = key * self.radix + digit;
            node = child;
        }
        Ok(key)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<V> OrderedIndex<V> for RadixTrie<V> {
    fn search(&self, key: u64) -> Option<&V> {
        RadixTrie::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        RadixTrie::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        RadixTrie::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        RadixTrie::max_key(self)
    }
    fn len(&self) -> usize {
        RadixTrie::len(self)
    }
}
