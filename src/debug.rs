//! Debug utilities for tree troubleshooting.

use crate::node::Node;
use crate::RadixTree;

impl<V: std::fmt::Debug> RadixTree<V> {
    /// Print the tree structure for debugging.
    pub fn debug_print(&self) {
        println!("=== RadixTree ===");
        println!("size: {}", self.size);
        Self::debug_node(&self.root, 0);
        println!("=================");
    }

    fn debug_node(node: &Node<V>, depth: usize) {
        let indent = "  ".repeat(depth);
        if let Some(leaf) = &node.leaf {
            println!("{}record {:02x?} -> {:?}", indent, leaf.key, leaf.value);
        }
        for edge in &node.edges {
            println!("{}[{:02x?}] ->", indent, edge.label);
            Self::debug_node(&edge.node, depth + 1);
        }
    }
}

impl<V> RadixTree<V> {
    /// Check the structural invariants, returning a description of every
    /// violation found.
    ///
    /// The tree upholds all of these after every mutation; a non-empty
    /// result is an implementation bug:
    /// - edge labels are never empty,
    /// - sibling edges are sorted by, and unique in, their first byte,
    /// - a non-root node either carries a record or has at least two edges,
    /// - a record's key equals the labels concatenated from the root,
    /// - the stored size equals the number of records.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut records = 0usize;
        Self::verify_node(&self.root, true, &mut Vec::new(), &mut records, &mut issues);
        if records != self.size {
            issues.push(format!(
                "size is {} but the tree holds {} records",
                self.size, records
            ));
        }
        issues
    }

    fn verify_node(
        node: &Node<V>,
        is_root: bool,
        path: &mut Vec<u8>,
        records: &mut usize,
        issues: &mut Vec<String>,
    ) {
        if let Some(leaf) = &node.leaf {
            *records += 1;
            if leaf.key != *path {
                issues.push(format!(
                    "record key {:02x?} does not match its path {:02x?}",
                    leaf.key, path
                ));
            }
        }
        if !is_root && node.leaf.is_none() && node.edges.len() < 2 {
            issues.push(format!(
                "record-less node at {:02x?} has {} edge(s)",
                path,
                node.edges.len()
            ));
        }

        let mut prev_first: Option<u8> = None;
        for edge in &node.edges {
            let Some(&first) = edge.label.first() else {
                issues.push(format!("empty edge label under {:02x?}", path));
                continue;
            };
            if let Some(prev) = prev_first {
                if prev >= first {
                    issues.push(format!(
                        "edges out of order under {:02x?}: {:#04x} then {:#04x}",
                        path, prev, first
                    ));
                }
            }
            prev_first = Some(first);

            let len = path.len();
            path.extend_from_slice(&edge.label);
            Self::verify_node(&edge.node, false, path, records, issues);
            path.truncate(len);
        }
    }
}
