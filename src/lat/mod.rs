//! Fixed-radix digit trie ("linked array tree").
//!
//! Every key decomposes into exactly `height` digits in base `radix`, most
//! significant digit first and zero-padded, so every successful search path
//! has the same length regardless of key magnitude. Index nodes cover the
//! first `height - 1` digits; the final digit selects a leaf holding a plain
//! key-to-value map.
//!
//! The structure represents `radix^height` distinct digit paths. Larger keys
//! still decompose by modulo/divide but alias onto an existing path; the
//! leaf map is keyed by the full key, so lookups stay exact, but digit-wise
//! min/max descent only orders keys inside the representable range.
//!
//! Unlike the other structures, `add` resolves a duplicate key by
//! overwriting the leaf-map entry (dictionary semantics at the leaf), not by
//! keeping the first value.

use std::collections::BTreeMap;

use crate::digits;
use crate::{check_parallel, IndexError, OrderedIndex, Result};

/// Ordered digit-to-child map; ordering makes min/max digit selection a
/// first/last lookup.
type Children<V> = BTreeMap<u64, LatNode<V>>;

enum LatNode<V> {
    Index(Children<V>),
    Leaf(BTreeMap<u64, V>),
}

/// Fixed-height digit trie from `u64` keys to values.
pub struct Lat<V> {
    root: Children<V>,
    radix: u64,
    height: usize,
    len: usize,
}

impl<V> Lat<V> {
    /// Default radix when none is supplied.
    pub const DEFAULT_RADIX: u64 = 4;
    /// Default height when none is supplied.
    pub const DEFAULT_HEIGHT: usize = 4;

    /// Create an empty trie.
    ///
    /// Fails with [`IndexError::InvalidInput`] unless `radix >= 2` and
    /// `height >= 1`; both are fixed for the structure's lifetime.
    pub fn new(radix: u64, height: usize) -> Result<Self> {
        if radix < 2 {
            return Err(IndexError::InvalidInput(format!(
                "radix must be at least 2, got {radix}"
            )));
        }
        if height == 0 {
            return Err(IndexError::InvalidInput("height must be at least 1".into()));
        }
        Ok(Lat {
            root: Children::new(),
            radix,
            height,
            len: 0,
        })
    }

    /// Build a trie with the default radix and height (4 and 4).
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch.
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        Self::with_config(keys, values, Self::DEFAULT_RADIX, Self::DEFAULT_HEIGHT)
    }

    /// Build a trie with an explicit radix and height.
    pub fn with_config(keys: &[u64], values: Vec<V>, radix: u64, height: usize) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let mut trie = Lat::new(radix, height)?;
        for (&key, value) in keys.iter().zip(values) {
            trie.add(key, value);
        }
        Ok(trie)
    }

    /// The radix fixed at construction.
    pub fn radix(&self) -> u64 {
        self.radix
    }

    /// The height fixed at construction.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of distinct digit paths the configuration can represent
    /// (`radix^height`), or `None` when that overflows `u64`.
    pub fn key_capacity(&self) -> Option<u64> {
        u32::try_from(self.height)
            .ok()
            .and_then(|height| self.radix.checked_pow(height))
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        let path = digits::fixed(key, self.radix, self.height);
        let mut children = &self.root;
        for &digit in &path[..self.height - 1] {
            match children.get(&digit)? {
                LatNode::Index(next) => children = next,
                LatNode::Leaf(_) => return None,
            }
        }
        match children.get(&path[self.height - 1])? {
            LatNode::Leaf(data) => data.get(&key),
            LatNode::Index(_) => None,
        }
    }

    /// Insert `key` with `value`, creating missing index nodes lazily.
    ///
    /// A duplicate key overwrites the existing leaf entry.
    pub fn add(&mut self, key: u64, value: V) {
        let path = digits::fixed(key, self.radix, self.height);
        let mut children = &mut self.root;
        for &digit in &path[..self.height - 1] {
            let child = children
                .entry(digit)
                .or_insert_with(|| LatNode::Index(Children::new()));
            match child {
                LatNode::Index(next) => children = next,
                // Node kind is a function of depth alone.
                LatNode::Leaf(_) => unreachable!("leaf above the final digit level"),
            }
        }
        let slot = children
            .entry(path[self.height - 1])
            .or_insert_with(|| LatNode::Leaf(BTreeMap::new()));
        match slot {
            LatNode::Leaf(data) => {
                if data.insert(key, value).is_none() {
                    self.len += 1;
                }
            }
            LatNode::Index(_) => unreachable!("index node at the final digit level"),
        }
    }

    /// Smallest key present: descend the smallest present digit at every
    /// index node, then take the smallest key in the reached leaf.
    ///
    /// Digit-wise descent agrees with numeric order because paths are most
    /// significant digit first.
    pub fn min_key(&self) -> Result<u64> {
        let mut children = &self.root;
        loop {
            let (_, child) = children
                .first_key_value()
                .ok_or(IndexError::EmptyStructure)?;
            match child {
                LatNode::Index(next) => children = next,
                LatNode::Leaf(data) => {
                    return data
                        .first_key_value()
                        .map(|(&key, _)| key)
                        .ok_or(IndexError::EmptyStructure);
                }
            }
        }
    }

    /// Largest key present, mirroring [`min_key`].
    ///
    /// [`min_key`]: Lat::min_key
    pub fn max_key(&self) -> Result<u64> {
        let mut children = &self.root;
        loop {
            let (_, child) = children
                .last_key_value()
                .ok_or(IndexError::EmptyStructure)?;
            match child {
                LatNode::Index(next) => children = next,
                LatNode::Leaf(data) => {
                    return data
                        .last_key_value()
                        .map(|(&key, _)| key)
                        .ok_or(IndexError::EmptyStructure);
                }
            }
        }
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

impl<V> OrderedIndex<V> for Lat<V> {
    fn search(&self, key: u64) -> Option<&V> {
        Lat::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        Lat::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        Lat::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        Lat::max_key(self)
    }
    fn len(&self) -> usize {
        Lat::len(self)
    }
}
