//! # radix-rs
//!
//! A byte-keyed radix tree (compressed trie) mapping arbitrary byte
//! sequences to values.
//!
//! Chains of single-child nodes are collapsed into edges carrying
//! multi-byte labels, so lookups, inserts and removals run in O(key
//! length). Besides point operations the tree supports ordered queries
//! (minimum, maximum, longest-prefix match), walks scoped to a prefix or
//! to the descent path of a key, and bulk removal of a whole prefix. Keys
//! are ordered bytewise; walks and iteration visit records in ascending
//! key order. The empty key is valid and is stored at the root.
//!
//! ## Example
//!
//! ```rust
//! use radix_rs::RadixTree;
//!
//! let mut tree: RadixTree<u64> = RadixTree::new();
//! tree.insert(b"hello", 1);
//! tree.insert(b"hello/world", 2);
//!
//! assert_eq!(tree.get(b"hello"), Some(&1));
//! assert_eq!(tree.longest_prefix(b"hello/there"), Some((&b"hello"[..], &1)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod debug;
mod node;

use std::collections::HashMap;

use crate::node::{common_prefix_len, Leaf, Node};

/// A byte-keyed radix tree mapping byte sequences to values of type `V`.
///
/// Values are opaque to the tree: they are never compared, hashed or
/// cloned by it. The container is not internally synchronized; concurrent
/// readers are fine, a writer needs exclusive access.
#[derive(Clone, PartialEq, Eq)]
pub struct RadixTree<V> {
    root: Node<V>,
    size: usize,
}

impl<V> RadixTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            size: 0,
        }
    }

    /// Build a tree from an unordered key-value mapping.
    ///
    /// The resulting structure depends only on the key set and the value
    /// stored per key, not on the order entries are drawn from the map.
    pub fn from_map(map: HashMap<Vec<u8>, V>) -> Self {
        let mut tree = Self::new();
        for (key, value) in map {
            tree.insert(&key, value);
        }
        tree
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Insert a key-value pair.
    ///
    /// Returns the previous value if the key was already present. The key
    /// is copied; the caller keeps ownership of its buffer.
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        let old = Self::insert_rec(&mut self.root, key, 0, value);
        if old.is_none() {
            self.size += 1;
        }
        old
    }

    fn insert_rec(node: &mut Node<V>, key: &[u8], depth: usize, value: V) -> Option<V> {
        if depth == key.len() {
            return match node.leaf.as_mut() {
                Some(leaf) => Some(std::mem::replace(&mut leaf.value, value)),
                None => {
                    node.leaf = Some(Leaf {
                        key: key.to_vec(),
                        value,
                    });
                    None
                }
            };
        }

        let idx = match node.edge_index(key[depth]) {
            Ok(idx) => idx,
            Err(_) => {
                // No edge for the next byte: the whole remainder becomes
                // one new edge.
                node.add_edge(key[depth..].to_vec(), Node::with_leaf(key.to_vec(), value));
                return None;
            }
        };

        let shared = common_prefix_len(&node.edges[idx].label, &key[depth..]);
        if shared == node.edges[idx].label.len() {
            return Self::insert_rec(&mut node.edges[idx].node, key, depth + shared, value);
        }

        // The label and the key diverge inside the label: split the edge
        // at the shared prefix.
        node.split_edge(idx, shared);
        let split = &mut node.edges[idx].node;
        if depth + shared == key.len() {
            split.leaf = Some(Leaf {
                key: key.to_vec(),
                value,
            });
        } else {
            split.add_edge(
                key[depth + shared..].to_vec(),
                Node::with_leaf(key.to_vec(), value),
            );
        }
        None
    }

    /// Get a reference to the value stored for `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            if depth == key.len() {
                return node.leaf.as_ref().map(|leaf| &leaf.value);
            }
            let edge = node.find_edge(key[depth])?;
            if !key[depth..].starts_with(&edge.label) {
                return None;
            }
            depth += edge.label.len();
            node = &edge.node;
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let old = Self::remove_rec(&mut self.root, key)?;
        self.size -= 1;
        Some(old)
    }

    fn remove_rec(node: &mut Node<V>, key: &[u8]) -> Option<V> {
        if key.is_empty() {
            return node.leaf.take().map(|leaf| leaf.value);
        }
        let idx = node.edge_index(key[0]).ok()?;
        if !key.starts_with(&node.edges[idx].label) {
            return None;
        }
        let consumed = node.edges[idx].label.len();
        let old = Self::remove_rec(&mut node.edges[idx].node, &key[consumed..])?;
        node.compress_child(idx);
        Some(old)
    }

    /// Remove every key having `prefix` as a prefix, returning how many
    /// were removed. The empty prefix clears the whole tree.
    pub fn remove_prefix(&mut self, prefix: &[u8]) -> usize {
        let removed = Self::remove_prefix_rec(&mut self.root, prefix);
        self.size -= removed;
        removed
    }

    fn remove_prefix_rec(node: &mut Node<V>, prefix: &[u8]) -> usize {
        if prefix.is_empty() {
            // Only reachable at the root: everything goes.
            let removed = Self::subtree_len(node);
            node.leaf = None;
            node.edges.clear();
            return removed;
        }
        let Ok(idx) = node.edge_index(prefix[0]) else {
            return 0;
        };
        let shared = common_prefix_len(&node.edges[idx].label, prefix);
        if shared == prefix.len() {
            // The prefix ends on or inside this edge: the whole subtree
            // below it matches.
            let edge = node.edges.remove(idx);
            return Self::subtree_len(&edge.node);
        }
        if shared == node.edges[idx].label.len() {
            let removed = Self::remove_prefix_rec(&mut node.edges[idx].node, &prefix[shared..]);
            if removed > 0 {
                node.compress_child(idx);
            }
            return removed;
        }
        0
    }

    fn subtree_len(node: &Node<V>) -> usize {
        let mut count = usize::from(node.leaf.is_some());
        for edge in &node.edges {
            count += Self::subtree_len(&edge.node);
        }
        count
    }

    /// The record with the bytewise least key, if any.
    pub fn minimum(&self) -> Option<(&[u8], &V)> {
        let mut node = &self.root;
        loop {
            if let Some(leaf) = &node.leaf {
                return Some((leaf.key.as_slice(), &leaf.value));
            }
            node = &node.edges.first()?.node;
        }
    }

    /// The record with the bytewise greatest key, if any.
    ///
    /// A node's own record always loses to its descendants, so this
    /// descends the last edge until no edge remains.
    pub fn maximum(&self) -> Option<(&[u8], &V)> {
        let mut node = &self.root;
        loop {
            match node.edges.last() {
                Some(edge) => node = &edge.node,
                None => {
                    let leaf = node.leaf.as_ref()?;
                    return Some((leaf.key.as_slice(), &leaf.value));
                }
            }
        }
    }

    /// The record whose key is the longest present prefix of `key`.
    pub fn longest_prefix(&self, key: &[u8]) -> Option<(&[u8], &V)> {
        let mut best = None;
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            if let Some(leaf) = &node.leaf {
                best = Some((leaf.key.as_slice(), &leaf.value));
            }
            if depth == key.len() {
                break;
            }
            let Some(edge) = node.find_edge(key[depth]) else {
                break;
            };
            if !key[depth..].starts_with(&edge.label) {
                break;
            }
            depth += edge.label.len();
            node = &edge.node;
        }
        best
    }

    /// Visit every record in ascending bytewise key order.
    ///
    /// The visitor returns `true` to stop the walk early.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        Self::walk_rec(&self.root, &mut visitor);
    }

    fn walk_rec<F>(node: &Node<V>, visitor: &mut F) -> bool
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        if let Some(leaf) = &node.leaf {
            if visitor(&leaf.key, &leaf.value) {
                return true;
            }
        }
        node.edges
            .iter()
            .any(|edge| Self::walk_rec(&edge.node, visitor))
    }

    /// Visit every record whose key has `prefix` as a prefix, in
    /// ascending key order. The visitor returns `true` to stop early.
    pub fn walk_prefix<F>(&self, prefix: &[u8], mut visitor: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        let mut node = &self.root;
        let mut rest = prefix;
        loop {
            if rest.is_empty() {
                Self::walk_rec(node, &mut visitor);
                return;
            }
            let Some(edge) = node.find_edge(rest[0]) else {
                return;
            };
            if rest.starts_with(&edge.label) {
                rest = &rest[edge.label.len()..];
                node = &edge.node;
            } else if edge.label.starts_with(rest) {
                // The prefix ends inside this label: everything below the
                // edge matches.
                Self::walk_rec(&edge.node, &mut visitor);
                return;
            } else {
                return;
            }
        }
    }

    /// Visit the records on the descent path from the root toward `key`:
    /// every present key that is a prefix of `key`, shortest first. The
    /// visitor returns `true` to stop early.
    pub fn walk_path<F>(&self, key: &[u8], mut visitor: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            if let Some(leaf) = &node.leaf {
                if visitor(&leaf.key, &leaf.value) {
                    return;
                }
            }
            if depth == key.len() {
                return;
            }
            let Some(edge) = node.find_edge(key[depth]) else {
                return;
            };
            if !key[depth..].starts_with(&edge.label) {
                return;
            }
            depth += edge.label.len();
            node = &edge.node;
        }
    }

    /// Iterate over all records in ascending bytewise key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![&self.root],
        }
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key.as_ref(), value);
        }
        tree
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over the records of a [`RadixTree`].
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            for edge in node.edges.iter().rev() {
                self.stack.push(&edge.node);
            }
            if let Some(leaf) = &node.leaf {
                return Some((leaf.key.as_slice(), &leaf.value));
            }
        }
        None
    }
}
