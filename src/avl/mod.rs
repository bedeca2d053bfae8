//! AVL-balanced binary search tree.
//!
//! Ordered map with logarithmic worst-case depth. Every node caches its
//! subtree height; after any structural change the balance factor
//! `height(left) - height(right)` is repaired to {-1, 0, 1} with the classic
//! four-case rotations on the way back up the recursion. Rebalancing is a
//! pure subtree-to-subtree function: it takes ownership of a root, returns
//! the repaired root, and the unwind reattaches it, so nodes never need
//! parent back-pointers.

use std::cmp::Ordering;

use crate::{check_parallel, IndexError, OrderedIndex, Result};

/// Exclusive parent-to-child ownership; dropping the tree drops every node.
type Link<V> = Option<Box<Node<V>>>;

#[derive(Debug)]
struct Node<V> {
    key: u64,
    value: V,
    /// Cached as `1 + max(height(left), height(right))`; 1 for a leaf.
    /// u8 is plenty: an AVL tree of height 64 holds more keys than fit in
    /// any address space.
    height: u8,
    left: Link<V>,
    right: Link<V>,
}

impl<V> Node<V> {
    fn new(key: u64, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }
}

fn height<V>(link: &Link<V>) -> u8 {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<V>(node: &Node<V>) -> i16 {
    i16::from(height(&node.left)) - i16::from(height(&node.right))
}

fn fix_height<V>(node: &mut Node<V>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

/// Left rotation; the right child becomes the subtree root. Only called on
/// right-heavy nodes, so the right child always exists.
fn rotate_left<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    match node.right.take() {
        None => node,
        Some(mut pivot) => {
            node.right = pivot.left.take();
            fix_height(&mut node);
            pivot.left = Some(node);
            fix_height(&mut pivot);
            pivot
        }
    }
}

/// Mirror of [`rotate_left`].
fn rotate_right<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    match node.left.take() {
        None => node,
        Some(mut pivot) => {
            node.left = pivot.right.take();
            fix_height(&mut node);
            pivot.right = Some(node);
            fix_height(&mut pivot);
            pivot
        }
    }
}

/// Recompute the cached height and repair the balance factor with the
/// four-case rotation scheme. Returns the (possibly new) subtree root.
fn rebalance<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    fix_height(&mut node);
    let balance = balance_factor(&node);

    if balance > 1 {
        // Left-right: rotate the left child left first.
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        // Right-left: rotate the right child right first.
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

/// BST insert with rebalancing on the unwind. Returns the repaired subtree
/// root and whether a node was actually inserted (false on duplicate).
fn insert<V>(link: Link<V>, key: u64, value: V) -> (Box<Node<V>>, bool) {
    let Some(mut node) = link else {
        return (Node::new(key, value), true);
    };
    match key.cmp(&node.key) {
        // First write wins.
        Ordering::Equal => (node, false),
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), key, value);
            node.left = Some(left);
            (rebalance(node), inserted)
        }
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), key, value);
            node.right = Some(right);
            (rebalance(node), inserted)
        }
    }
}

/// Detach the minimum node of a subtree, rebalancing the remainder.
fn take_min<V>(mut node: Box<Node<V>>) -> (Link<V>, Box<Node<V>>) {
    match node.left.take() {
        None => (node.right.take(), node),
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

/// Three-case removal: leaf, single child, or two children spliced through
/// the in-order successor. Rebalances on the unwind like insertion.
fn remove<V>(link: Link<V>, key: u64) -> (Link<V>, Option<V>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            if removed.is_some() {
                (Some(rebalance(node)), removed)
            } else {
                (Some(node), None)
            }
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            if removed.is_some() {
                (Some(rebalance(node)), removed)
            } else {
                (Some(node), None)
            }
        }
        Ordering::Equal => {
            let Node {
                value, left, right, ..
            } = *node;
            let replacement = match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (right, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = right;
                    Some(rebalance(successor))
                }
            };
            (replacement, Some(value))
        }
    }
}

/// Rotation-balanced ordered map from `u64` keys to values.
///
/// `add` is a no-op when the key already exists (first write wins).
#[derive(Debug)]
pub struct AvlTree<V> {
    root: Link<V>,
    len: usize,
}

impl<V> AvlTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        AvlTree { root: None, len: 0 }
    }

    /// Build a tree from parallel key/value sequences by repeated [`add`],
    /// so duplicate keys in the input keep their first value.
    ///
    /// Fails with [`IndexError::InvalidInput`] on a length mismatch.
    ///
    /// [`add`]: AvlTree::add
    pub fn from_pairs(keys: &[u64], values: Vec<V>) -> Result<Self> {
        check_parallel(keys, values.len())?;
        let mut tree = AvlTree::new();
        for (&key, value) in keys.iter().zip(values) {
            tree.add(key, value);
        }
        Ok(tree)
    }

    /// Look up the value stored for `key`.
    pub fn search(&self, key: u64) -> Option<&V> {
        let mut node = self.root.as_deref()?;
        loop {
            node = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref()?,
                Ordering::Greater => node.right.as_deref()?,
            };
        }
    }

    /// Insert `key` with `value`; no-op if the key is already present.
    pub fn add(&mut self, key: u64, value: V) {
        let (root, inserted) = insert(self.root.take(), key, value);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
    }

    /// Remove `key`, returning its value, or `None` if absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Smallest key present (leftmost node).
    pub fn min_key(&self) -> Result<u64> {
        let mut node = self.root.as_deref().ok_or(IndexError::EmptyStructure)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(node.key)
    }

    /// Largest key present (rightmost node).
    pub fn max_key(&self) -> Result<u64> {
        let mut node = self.root.as_deref().ok_or(IndexError::EmptyStructure)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(node.key)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// In-order iterator over `(key, &value)`, ascending by key.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Walk the whole tree asserting the AVL invariants: cached heights are
    /// consistent and every balance factor is in {-1, 0, 1}. Also checks the
    /// BST key order. Panics on the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        fn check<V>(link: &Link<V>, lo: Option<u64>, hi: Option<u64>) -> u8 {
            let Some(node) = link.as_deref() else { return 0 };
            if let Some(lo) = lo {
                assert!(node.key > lo, "key {} violates BST order", node.key);
            }
            if let Some(hi) = hi {
                assert!(node.key < hi, "key {} violates BST order", node.key);
            }
            let left = check(&node.left, lo, Some(node.key));
            let right = check(&node.right, Some(node.key), hi);
            assert_eq!(
                node.height,
                1 + left.max(right),
                "stale cached height at key {}",
                node.key
            );
            let balance = i16::from(left) - i16::from(right);
            assert!(
                (-1..=1).contains(&balance),
                "balance factor {balance} at key {}",
                node.key
            );
            node.height
        }
        check(&self.root, None, None);
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> for AvlTree<V> {
    fn search(&self, key: u64) -> Option<&V> {
        AvlTree::search(self, key)
    }
    fn add(&mut self, key: u64, value: V) {
        AvlTree::add(self, key, value)
    }
    fn min_key(&self) -> Result<u64> {
        AvlTree::min_key(self)
    }
    fn max_key(&self) -> Result<u64> {
        AvlTree::max_key(self)
    }
    fn len(&self) -> usize {
        AvlTree::len(self)
    }
}

/// In-order traversal with an explicit left-spine stack.
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((node.key, &node.value))
    }
}
