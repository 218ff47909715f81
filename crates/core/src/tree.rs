//! Huffman tree construction.
//!
//! The tree is never stored: encoder and decoder both rebuild it from the
//! frequency table, so construction must be fully deterministic.
//!
//! # Tie-breaking
//!
//! Leaves are queued in ascending symbol order, each stamped with an
//! increasing sequence number; every merged node takes the next number.
//! The queue pops the smallest `(weight, sequence)` pair, so equal weights
//! resolve by age. The first node popped in a merge becomes the left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// A node of the Huffman tree.
///
/// Internal nodes own both children exclusively, so the tree has no sharing
/// and no cycles. A tree over N distinct symbols has N leaves and N - 1
/// internal nodes; with N == 1 the root is itself a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Frequency of a leaf, or the summed frequency of an internal node's subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// The symbol held by a leaf; internal nodes hold none.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// `(left, right)` for internal nodes.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        self.children()
            .map(|(left, right)| if bit { right } else { left })
    }

    pub fn leaf_count(&self) -> usize {
        self.walk().filter(|node| node.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.walk().filter(|node| !node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                None => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Pre-order traversal (node, then left subtree, then right subtree).
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterative pre-order traversal over a tree.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

/// A queued node with its tie-breaking sequence number.
#[derive(Debug)]
struct QueuedNode {
    sequence: u64,
    node: Node,
}

impl QueuedNode {
    fn key(&self) -> (u64, u64) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lighter, then older = higher priority)
        other.key().cmp(&self.key())
    }
}

/// Build the Huffman tree for a frequency table.
///
/// # Errors
/// - `HuffmanError::EmptyInput` if the table has no entries
/// - `HuffmanError::WeightOverflow` if the counts sum past `u64::MAX`
pub fn build(frequencies: &FrequencyTable) -> Result<Node> {
    let mut queue: BinaryHeap<QueuedNode> = frequencies
        .iter()
        .zip(0u64..)
        .map(|((&symbol, &weight), sequence)| QueuedNode {
            sequence,
            node: Node::Leaf { symbol, weight },
        })
        .collect();
    let mut next_sequence = queue.len() as u64;

    loop {
        let (first, second) = match (queue.pop(), queue.pop()) {
            (Some(first), Some(second)) => (first, second),
            (Some(root), None) => {
                debug!(
                    symbols = frequencies.len(),
                    depth = root.node.depth(),
                    weight = root.node.weight(),
                    "built huffman tree"
                );
                return Ok(root.node);
            }
            _ => return Err(HuffmanError::EmptyInput.into()),
        };

        let weight = first
            .node
            .weight()
            .checked_add(second.node.weight())
            .ok_or(HuffmanError::WeightOverflow)?;
        let merged = Node::Internal {
            weight,
            left: Box::new(first.node),
            right: Box::new(second.node),
        };
        queue.push(QueuedNode {
            sequence: next_sequence,
            node: merged,
        });
        next_sequence += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: char, weight: u64) -> Node {
        Node::Leaf { symbol, weight }
    }

    #[test]
    fn test_empty_table() {
        let result = build(&FrequencyTable::default());
        assert!(result.unwrap_err().is_empty_input());
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let root = build(&FrequencyTable::from_text("aaaa")).unwrap();
        assert_eq!(root, leaf('a', 4));
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_two_symbols() {
        let root = build(&FrequencyTable::from_text("abb")).unwrap();
        assert_eq!(
            root,
            Node::Internal {
                weight: 3,
                left: Box::new(leaf('a', 1)),
                right: Box::new(leaf('b', 2)),
            }
        );
    }

    #[test]
    fn test_ties_resolve_by_symbol_then_age() {
        // a, b, c, d all weigh 1: (a,b) merge first, then (c,d), then the two pairs.
        let root = build(&FrequencyTable::from_text("abcd")).unwrap();
        let (left, right) = root.children().unwrap();
        let (ll, lr) = left.children().unwrap();
        let (rl, rr) = right.children().unwrap();
        assert_eq!(ll.symbol(), Some('a'));
        assert_eq!(lr.symbol(), Some('b'));
        assert_eq!(rl.symbol(), Some('c'));
        assert_eq!(rr.symbol(), Some('d'));
    }

    #[test]
    fn test_older_merged_node_wins_tie_with_newer_leaf() {
        // a:1 b:1 c:2 -> (a,b) weighs 2 and is newer than c, so c goes left.
        let root = build(&FrequencyTable::from_text("abcc")).unwrap();
        let (left, right) = root.children().unwrap();
        assert_eq!(left.symbol(), Some('c'));
        assert_eq!(right.weight(), 2);
        assert!(!right.is_leaf());
    }

    #[test]
    fn test_node_counts() {
        let table = FrequencyTable::from_text("the quick brown fox jumps over the lazy dog");
        let root = build(&table).unwrap();
        assert_eq!(root.leaf_count(), table.len());
        assert_eq!(root.internal_count(), table.len() - 1);
        assert_eq!(root.weight(), table.total());
    }

    #[test]
    fn test_weight_overflow() {
        let table = FrequencyTable::from_counts([('a', u64::MAX), ('b', 1)]);
        let err = build(&table).unwrap_err();
        assert!(err.is_corrupt_container());

        let table = FrequencyTable::from_counts([('a', u64::MAX - 1), ('b', 1)]);
        assert_eq!(build(&table).unwrap().weight(), u64::MAX);
    }

    #[test]
    fn test_deterministic() {
        let table = FrequencyTable::from_text("mississippi river banks");
        assert_eq!(build(&table).unwrap(), build(&table).unwrap());
    }

    #[test]
    fn test_walk_is_preorder() {
        let root = build(&FrequencyTable::from_text("abb")).unwrap();
        let weights: Vec<u64> = root.walk().map(Node::weight).collect();
        assert_eq!(weights, vec![3, 1, 2]);
    }

    #[test]
    fn test_child_follows_bits() {
        let root = build(&FrequencyTable::from_text("abb")).unwrap();
        assert_eq!(root.child(false).and_then(Node::symbol), Some('a'));
        assert_eq!(root.child(true).and_then(Node::symbol), Some('b'));
        assert!(root.child(true).unwrap().child(false).is_none());
    }
}
