//! # ordidx
//!
//! In-memory ordered key-value index structures over fixed-width integer
//! keys, built to compare lookup, insert, min and max cost across designs.
//!
//! Four non-trivial structures share one capability contract:
//!
//! - [`AvlTree`]: rotation-balanced binary search tree, O(log n) worst case.
//! - [`SkipList`]: randomized multi-level linked list, O(log n) expected.
//! - [`Lat`]: fixed-radix digit trie ("linked array tree"), O(height)
//!   independent of key magnitude.
//! - [`RadixTrie`]: adaptive radix trie, depth scales with the number of
//!   digits a key actually needs.
//!
//! Two deliberately plain baselines ([`SortedArray`], [`HashIndex`]) are kept
//! in-tree so benches always have a reference point.
//!
//! All structures are single-threaded: no operation performs I/O, blocks, or
//! synchronizes. Callers that need shared access must serialize it themselves.
//!
//! ## Example
//!
//! ```rust
//! use ordidx::AvlTree;
//!
//! let keys = [5u64, 3, 8, 1];
//! let values = vec!["e", "c", "h", "a"];
//! let tree = AvlTree::from_pairs(&keys, values).unwrap();
//!
//! assert_eq!(tree.search(8), Some(&"h"));
//! assert_eq!(tree.search(4), None);
//! assert_eq!(tree.min_key().unwrap(), 1);
//! assert_eq!(tree.max_key().unwrap(), 8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod avl;
pub mod baseline;
pub mod lat;
pub mod radix;
pub mod skiplist;

mod digits;

pub use avl::AvlTree;
pub use baseline::{HashIndex, SortedArray};
pub use lat::Lat;
pub use radix::RadixTrie;
pub use skiplist::SkipList;

use thiserror::Error;

/// Errors reported by index construction and whole-structure queries.
///
/// A key that is simply absent is never an error: `search`, `remove` and
/// `update` report absence through their return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Malformed construction arguments: mismatched key/value lengths, an
    /// out-of-range structural parameter, or a parameter that cannot be
    /// inferred from an empty key set.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `min_key`/`max_key` requested on a structure with no entries.
    #[error("structure is empty")]
    EmptyStructure,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IndexError>;

/// The uniform capability set every index structure exposes.
///
/// The benchmarking side depends only on this trait, so structures can be
/// timed polymorphically through `Box<dyn OrderedIndex<V>>`. Construction
/// stays on the concrete types because configuration differs per structure.
pub trait OrderedIndex<V> {
    /// Look up the value stored for `key`.
    fn search(&self, key: u64) -> Option<&V>;

    /// Insert `key` with `value`.
    ///
    /// Succeeds silently whether or not the key already existed. The
    /// duplicate-key policy is per-structure and documented on each
    /// implementation; it is first-write-wins everywhere except the
    /// fixed-radix trie, whose leaf map overwrites.
    fn add(&mut self, key: u64, value: V);

    /// Smallest key present, or [`IndexError::EmptyStructure`].
    fn min_key(&self) -> Result<u64>;

    /// Largest key present, or [`IndexError::EmptyStructure`].
    fn max_key(&self) -> Result<u64>;

    /// Number of keys present.
    fn len(&self) -> usize;

    /// Whether the structure holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every structure builds from parallel key/value sequences; reject a length
/// mismatch before touching anything.
pub(crate) fn check_parallel(keys: &[u64], values_len: usize) -> Result<()> {
    if keys.len() != values_len {
        return Err(IndexError::InvalidInput(format!(
            "keys and values differ in length ({} vs {})",
            keys.len(),
            values_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_build_input() {
        let keys = [1u64, 2, 3];
        let err = AvlTree::from_pairs(&keys, vec!["a", "b"]).unwrap_err();
        assert!(matches!(err, IndexError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_min_max_is_an_error() {
        let tree: AvlTree<u64> = AvlTree::new();
        assert_eq!(tree.min_key(), Err(IndexError::EmptyStructure));
        assert_eq!(tree.max_key(), Err(IndexError::EmptyStructure));
    }

    #[test]
    fn test_dynamic_dispatch() {
        let keys = [2u64, 9, 4];
        let values = vec![20u64, 90, 40];

        let mut indexes: Vec<Box<dyn OrderedIndex<u64>>> = vec![
            Box::new(AvlTree::from_pairs(&keys, values.clone()).unwrap()),
            Box::new(SkipList::from_pairs(&keys, values.clone()).unwrap()),
            Box::new(Lat::from_pairs(&keys, values.clone()).unwrap()),
            Box::new(RadixTrie::from_pairs(&keys, values.clone()).unwrap()),
            Box::new(SortedArray::from_pairs(&keys, values.clone()).unwrap()),
            Box::new(HashIndex::from_pairs(&keys, values).unwrap()),
        ];

        for index in &mut indexes {
            assert_eq!(index.min_key().unwrap(), 2);
            assert_eq!(index.max_key().unwrap(), 9);
            index.add(7, 70);
            assert_eq!(index.search(7), Some(&70));
            assert_eq!(index.search(3), None);
            assert_eq!(index.len(), 4);
        }
    }
}
