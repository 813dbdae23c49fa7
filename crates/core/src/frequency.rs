//! Per-symbol occurrence counts.

use std::collections::BTreeMap;

use crate::error::{Result, TableError};

/// Mapping from symbol to the number of times it occurs.
///
/// Iteration is by ascending symbol. Symbols with a zero count are never
/// stored, so `len()` is the number of distinct symbols.
///
/// The sum of all counts always fits in a `u64`, so any partial sum over the
/// entries does too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every character of `text` in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        // At most one count per char, so the total stays within usize
        for ch in text.chars() {
            *table.counts.entry(ch).or_insert(0) += 1;
            table.total += 1;
        }
        table
    }

    /// Build from `(symbol, count)` pairs. Repeated symbols accumulate and
    /// zero counts are dropped.
    ///
    /// # Errors
    /// `TableError::CountOverflow` if the counts sum past `u64::MAX`.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in counts {
            table.add(symbol, count)?;
        }
        Ok(table)
    }

    /// Record one occurrence of `symbol`.
    pub fn record(&mut self, symbol: char) -> Result<()> {
        self.add(symbol, 1)
    }

    /// Record `count` occurrences of `symbol`.
    ///
    /// # Errors
    /// `TableError::CountOverflow` if the total would pass `u64::MAX`. The
    /// table is left unchanged.
    pub fn add(&mut self, symbol: char, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let total = self
            .total
            .checked_add(count)
            .ok_or(TableError::CountOverflow { symbol })?;

        *self.counts.entry(symbol).or_insert(0) += count;
        self.total = total;
        Ok(())
    }

    /// Occurrences of `symbol` (0 if absent).
    pub fn count(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(symbol, count)` by ascending symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn test_from_text() {
        let table = FrequencyTable::from_text("!my name is !ted");
        assert_eq!(table.count(' '), 3);
        assert_eq!(table.count('!'), 2);
        assert_eq!(table.count('m'), 2);
        assert_eq!(table.count('y'), 1);
        assert_eq!(table.count('z'), 0);
        assert_eq!(table.len(), 11);
        assert_eq!(table.total(), 16);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_text("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_from_counts_accumulates() {
        let table = FrequencyTable::from_counts([('a', 2), ('b', 0), ('a', 3)]).unwrap();
        assert_eq!(table.count('a'), 5);
        assert_eq!(table.len(), 1);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_total_at_limit() {
        let table = FrequencyTable::from_counts([('a', u64::MAX - 1), ('b', 1)]).unwrap();
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_count_overflow_rejected() {
        let err = FrequencyTable::from_counts([('a', u64::MAX), ('b', u64::MAX)]).unwrap_err();
        assert!(matches!(
            err,
            Error::Table(TableError::CountOverflow { symbol: 'b' })
        ));
        assert_eq!(err.kind(), ErrorKind::Corrupt);

        let mut table = FrequencyTable::from_counts([('a', u64::MAX)]).unwrap();
        assert!(table.record('a').is_err());
        assert_eq!(table.count('a'), u64::MAX);
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_record() {
        let mut table = FrequencyTable::new();
        table.record('x').unwrap();
        table.record('x').unwrap();
        assert_eq!(table, FrequencyTable::from_text("xx"));
    }

    #[test]
    fn test_iteration_order() {
        let table = FrequencyTable::from_text("cabbage");
        let symbols: Vec<char> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'e', 'g']);
    }
}
