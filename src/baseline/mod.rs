//! Trivial reference baselines.
//!
//! No structural cleverness here: a sorted pair of parallel vectors and a
//! plain hash map. They exist so the comparison benches always include the
//! flattest possible layouts next to the real index structures.

use std::collections::HashMap;

use crate::{check_parallel, IndexError, OrderedIndex, Result};

/// Parallel sorted `keys`/`values` vectors; search is a binary search,
/// insert shifts the tail.
///
/// `add` is a no-op when the key already exists (first write wins).
pub struct SortedArray<V> {
    keys: Vec<u64>,
    values: Vec<V>,
}

impl<V> SortedArray<V> {
    /// Create an empty array.
    pub fn new() -> Self {
        SortedArray {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from parallel key/value sequences; duplicate keys keep their
    /// first value.
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch.
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let mut array = SortedArray::new();
        for (&key, value) in keys.iter().zip(values) {
            array.add(key, value);
        }
        Ok(array)
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        let index = self.keys.binary_search(&key).ok()?;
        Some(&self.values[index])
    }

    /// Insert `key` with `value` at its sorted position; no-op on duplicate.
    pub fn add(&mut self, key: u64, value: V) {
        if let Err(index) = self.keys.binary_search(&key) {
            self.keys.insert(index, key);
            self.values.insert(index, value);
        }
    }

    /// Replace the value stored for `key`; no-op if absent.
    pub fn update(&mut self, key: u64, value: V) {
        if let Ok(index) = self.keys.binary_search(&key) {
            self.values[index] = value;
        }
    }

    /// Remove `key`, returning its value, or `None` if absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let index = self.keys.binary_search(&key).ok()?;
        self.keys.remove(index);
        Some(self.values.remove(index))
    }

    /// Values of all keys in `start..=end` (inclusive bounds), in ascending
    /// key order; empty when no key falls in the window.
    pub fn range_query(&self, start: u64, end: u64) -> &[V] {
        let from = self.keys.partition_point(|&k| k < start);
        let to = self.keys.partition_point(|&k| k <= end);
        &self.values[from..to]
    }

    /// The `n`-th smallest key, 1-based; `None` when out of range.
    pub fn nth_smallest_key(&self, n: usize) -> Option<u64> {
        if n == 0 {
            return None;
        }
        self.keys.get(n - 1).copied()
    }

    /// The `n`-th largest key, 1-based; `None` when out of range.
    pub fn nth_largest_key(&self, n: usize) -> Option<u64> {
        if n == 0 || n > self.keys.len() {
            return None;
        }
        self.keys.get(self.keys.len() - n).copied()
    }

    /// Smallest key present.
    pub fn min_key(&self) -> Result<u64> {
        self.keys.first().copied().ok_or(IndexError::EmptyStructure)
    }

    /// Largest key present.
    pub fn max_key(&self) -> Result<u64> {
        self.keys.last().copied().ok_or(IndexError::EmptyStructure)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the array holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<V> Default for SortedArray<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> for SortedArray<V> {
    fn search(&self, key: u64) -> Option<&V> {
        SortedArray::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        SortedArray::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        SortedArray::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        SortedArray::max_key(self)
    }
    fn len(&self) -> usize {
        SortedArray::len(self)
    }
}

/// Hash-map baseline: O(1) amortized point operations, O(n) min/max scans.
///
/// `add` is a no-op when the key already exists (first write wins).
pub struct HashIndex<V> {
    table: HashMap<u64, V>,
}

impl<V> HashIndex<V> {
    /// Create an empty index.
    pub fn new() -> Self {
        HashIndex {
            table: HashMap::new(),
        }
    }

    /// Build from parallel key/value sequences; duplicate keys keep their
    /// first value.
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch.
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let mut index = HashIndex::new();
        for (&key, value) in keys.iter().zip(values) {
            index.add(key, value);
        }
        Ok(index)
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        self.table.get(&key)
    }

    /// Insert `key` with `value`; no-op on duplicate.
    pub fn add(&mut self, key: u64, value: V) {
        self.table.entry(key).or_insert(value);
    }

    /// Replace the value stored for `key`; no-op if absent.
    pub fn update(&mut self, key: u64, value: V) {
        if let Some(slot) = self.table.get_mut(&key) {
            *slot = value;
        }
    }

    /// Remove `key`, returning its value, or `None` if absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        self.table.remove(&key)
    }

    /// Smallest key present (full scan).
    pub fn min_key(&self) -> Result<u64> {
        self.table
            .keys()
            .min()
            .copied()
            .ok_or(IndexError::EmptyStructure)
    }

    /// Largest key present (full scan).
    pub fn max_key(&self) -> Result<u64> {
        self.table
            .keys()
            .max()
            .copied()
            .ok_or(IndexError::EmptyStructure)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> for HashIndex<V> {
    fn search(&self, key: u64) -> Option<&V> {
        HashIndex::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        HashIndex::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        HashIndex::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        HashIndex::max_key(self)
    }
    fn len(&self) -> usize {
        HashIndex::len(self)
    }
}
