//! Code generation from a Huffman tree.
//!
//! Walking from the root, a left edge appends `0` and a right edge appends
//! `1`; the accumulated path at a leaf is that leaf's code. Only leaves carry
//! symbols, so the resulting codes are prefix-free.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use tracing::trace;

use crate::bitio::bits_to_string;
use crate::tree::Node;

/// One symbol's code: a root-to-leaf path, `false` = left, `true` = right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits_to_string(&self.bits))
    }
}

/// Mapping from symbol to code, derived from one specific tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, char, Code> {
        self.codes.iter()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // After sorting, a prefix always sorts directly before some code it prefixes.
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort_by(|a, b| a.bits.cmp(&b.bits));
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = (&'a char, &'a Code);
    type IntoIter = btree_map::Iter<'a, char, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generate the code table for a tree.
///
/// Each call builds a fresh table. A tree that is a single leaf has no edges,
/// so its symbol gets the one-bit code `0` instead of an empty code.
pub fn generate(root: &Node) -> CodeTable {
    let mut codes = BTreeMap::new();

    if let Node::Leaf { symbol, .. } = root {
        codes.insert(*symbol, Code::from_bits(vec![false]));
        return CodeTable { codes };
    }

    let mut stack = vec![(root, Vec::new())];
    while let Some((node, prefix)) = stack.pop() {
        match node {
            Node::Leaf { symbol, .. } => {
                trace!(symbol = ?symbol, code = %bits_to_string(&prefix), "assigned code");
                codes.insert(*symbol, Code::from_bits(prefix));
            }
            Node::Internal { left, right, .. } => {
                let mut right_prefix = prefix.clone();
                right_prefix.push(true);
                let mut left_prefix = prefix;
                left_prefix.push(false);
                stack.push((right.as_ref(), right_prefix));
                stack.push((left.as_ref(), left_prefix));
            }
        }
    }

    CodeTable { codes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree;

    fn table_for(text: &str) -> CodeTable {
        generate(&tree::build(&FrequencyTable::from_text(text)).unwrap())
    }

    #[test]
    fn test_two_symbols() {
        let codes = table_for("abb");
        assert_eq!(codes.get('a').unwrap().to_string(), "0");
        assert_eq!(codes.get('b').unwrap().to_string(), "1");
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let codes = table_for("aaaa");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get('a').unwrap().to_string(), "0");
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let codes = table_for("aaaaaaaabbbbccd");
        let a = codes.get('a').unwrap().len();
        let b = codes.get('b').unwrap().len();
        let d = codes.get('d').unwrap().len();
        assert!(a <= b);
        assert!(b <= d);
        assert_eq!(codes.max_len(), d);
    }

    #[test]
    fn test_prefix_free() {
        let codes = table_for("she sells sea shells by the sea shore");
        assert!(codes.is_prefix_free());
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn test_detects_prefix_collision() {
        let codes = CodeTable {
            codes: BTreeMap::from([
                ('a', Code::from_bits(vec![false])),
                ('b', Code::from_bits(vec![false, true])),
            ]),
        };
        assert!(!codes.is_prefix_free());
    }

    #[test]
    fn test_fresh_table_per_call() {
        let first = table_for("xy");
        let second = table_for("pq");
        assert!(first.get('p').is_none());
        assert!(second.get('x').is_none());
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_kraft_equality() {
        // A full binary tree satisfies sum(2^-len) == 1.
        let codes = table_for("abracadabra alakazam");
        let max = codes.max_len();
        let sum: u64 = codes.iter().map(|(_, code)| 1u64 << (max - code.len())).sum();
        assert_eq!(sum, 1u64 << max);
    }
}
