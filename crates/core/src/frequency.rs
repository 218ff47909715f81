//! Symbol frequency counting.
//!
//! A [`FrequencyTable`] is the only model information stored in a container:
//! the decoder rebuilds the exact same tree from it. Entries are kept in
//! ascending symbol order so that iteration order never depends on how the
//! table was produced (counted from text or parsed from a container).

use std::collections::btree_map::{self, BTreeMap};

/// Occurrence count of every symbol in a text.
///
/// # Invariants
/// - every count is > 0
/// - immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every `char` of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Build a table from explicit counts, dropping zero entries.
    ///
    /// Later duplicates of a symbol replace earlier ones; the container parser
    /// rejects duplicates before calling this.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        Self {
            counts: counts.into_iter().filter(|&(_, count)| count > 0).collect(),
        }
    }

    /// Count for `symbol`, 0 if it never occurs.
    pub fn get(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of symbols in the source text.
    ///
    /// Saturates at `u64::MAX`; use [`checked_total`](Self::checked_total)
    /// for tables built from untrusted counts.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Sum of all counts, `None` on overflow.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, char, u64> {
        self.counts.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a char, &'a u64);
    type IntoIter = btree_map::Iter<'a, char, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_symbol() {
        let table = FrequencyTable::from_text("abracadabra");
        assert_eq!(table.get('a'), 5);
        assert_eq!(table.get('b'), 2);
        assert_eq!(table.get('r'), 2);
        assert_eq!(table.get('c'), 1);
        assert_eq!(table.get('d'), 1);
        assert_eq!(table.get('z'), 0);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_total_matches_char_count() {
        let text = "héllo wörld\t\r";
        let table = FrequencyTable::from_text(text);
        assert_eq!(table.total(), text.chars().count() as u64);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let table = FrequencyTable::from_text("cab ");
        let symbols: Vec<char> = table.symbols().collect();
        assert_eq!(symbols, vec![' ', 'a', 'b', 'c']);
    }

    #[test]
    fn test_empty_text() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_total_overflow() {
        let table = FrequencyTable::from_counts([('a', u64::MAX), ('b', 2)]);
        assert_eq!(table.checked_total(), None);
        assert_eq!(table.total(), u64::MAX);
        assert_eq!(FrequencyTable::from_text("abb").checked_total(), Some(3));
    }

    #[test]
    fn test_from_counts_drops_zeros() {
        let table = FrequencyTable::from_counts([('b', 2), ('a', 0), ('c', 1)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table, FrequencyTable::from_text("bbc"));
    }
}
