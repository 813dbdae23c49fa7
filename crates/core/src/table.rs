//! Prefix-code table built by frequency-sorted bisection (Shannon-Fano).
//!
//! # Algorithm
//!
//! 1. One entry per distinct symbol, all starting with an empty code.
//! 2. Sort by count descending, then symbol ascending.
//! 3. For a range of two or more entries, pick the split `d` that balances the
//!    weight of `[start, d)` against `[d, end)`. Candidates are scanned left to
//!    right and a candidate is taken only while the imbalance strictly
//!    decreases, so ties resolve to the leftmost position.
//! 4. Append a 0 bit to every entry left of `d` and a 1 bit to the rest.
//! 5. Repeat on both halves.
//!
//! Ranges are kept on an explicit work list over a single sorted array, so a
//! skewed distribution cannot exhaust the call stack. Every range is a
//! contiguous slice of the sorted array, which keeps the ordering invariant in
//! every partition.
//!
//! # Degenerate Tables
//!
//! An empty frequency table yields an empty table. A single symbol gets a
//! zero-length code: packing it produces no bits and decoding relies on the
//! expected symbol count alone.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::CodecConfig;
use crate::error::{Result, TableError};
use crate::frequency::FrequencyTable;

/// A bit pattern of up to 64 bits, stored right-aligned.
///
/// The first bit of the code on the wire is bit `len - 1` of `bits`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The zero-length code.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its right-aligned value and length.
    ///
    /// Bits of `bits` above `len` are discarded.
    pub fn new(bits: u64, len: u8) -> Self {
        let len = len.min(64);
        let bits = match len {
            0 => 0,
            64 => bits,
            n => bits & ((1u64 << n) - 1),
        };
        Self { bits, len }
    }

    /// Right-aligned code value.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// This code extended by one bit.
    ///
    /// Callers keep `len < 64`; the builder and the unpacker both stop at the
    /// configured code length limit first.
    pub(crate) fn child(self, bit: bool) -> Self {
        Self {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        }
    }

    /// Whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        let head = if shift == 64 { 0 } else { other.bits >> shift };
        head == self.bits
    }

    /// The code as a string of '0' and '1', most significant bit first.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// One symbol's row in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: char,
    pub count: u64,
    pub code: Code,
}

/// Mapping from symbol to prefix-free code.
///
/// Built once from a frequency table and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct EncodingTable {
    /// Entries in builder order (count descending, symbol ascending)
    entries: Vec<CodeEntry>,
    by_symbol: HashMap<char, usize>,
    by_code: HashMap<Code, char>,
    max_code_len: usize,
    /// Counts the table was built from
    freqs: FrequencyTable,
}

impl EncodingTable {
    /// Build the table for `freqs`.
    ///
    /// # Errors
    /// - `Error::Config` if `config` is invalid
    /// - `TableError::CodeTooLong` if a code would exceed `config.max_code_len`
    pub fn build(freqs: &FrequencyTable, config: &CodecConfig) -> Result<Self> {
        config.validate()?;

        let mut entries: Vec<CodeEntry> = freqs
            .iter()
            .map(|(symbol, count)| CodeEntry {
                symbol,
                count,
                code: Code::EMPTY,
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.symbol.cmp(&b.symbol)));

        let max = config.max_code_len;
        let mut work = vec![(0, entries.len())];

        while let Some((start, end)) = work.pop() {
            let group = &mut entries[start..end];
            if group.len() < 2 {
                continue;
            }

            let split = split_point(group);

            for (i, entry) in group.iter_mut().enumerate() {
                if entry.code.len() >= max as usize {
                    return Err(TableError::CodeTooLong {
                        symbol: entry.symbol,
                        length: entry.code.len() + 1,
                        max,
                    }
                    .into());
                }
                entry.code = entry.code.child(i >= split);
            }

            // Left half first off the stack
            work.push((start + split, end));
            work.push((start, start + split));
        }

        Ok(Self::from_entries(entries, freqs.clone()))
    }

    /// Build the table from the statistics of `text` itself.
    pub fn from_text(text: &str, config: &CodecConfig) -> Result<Self> {
        Self::build(&FrequencyTable::from_text(text), config)
    }

    /// Assemble a table from entries that already carry prefix-free codes.
    pub(crate) fn from_entries(entries: Vec<CodeEntry>, freqs: FrequencyTable) -> Self {
        let by_symbol = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.symbol, i))
            .collect();
        let by_code = entries.iter().map(|e| (e.code, e.symbol)).collect();
        let max_code_len = entries.iter().map(|e| e.code.len()).max().unwrap_or(0);

        Self {
            entries,
            by_symbol,
            by_code,
            max_code_len,
            freqs,
        }
    }

    /// Code assigned to `symbol`.
    ///
    /// # Errors
    /// `TableError::UnknownSymbol` if the symbol has no entry.
    pub fn lookup(&self, symbol: char) -> Result<Code> {
        self.get(symbol)
            .map(|entry| entry.code)
            .ok_or_else(|| TableError::UnknownSymbol { symbol }.into())
    }

    /// Full entry for `symbol`, if present.
    pub fn get(&self, symbol: char) -> Option<&CodeEntry> {
        self.by_symbol.get(&symbol).map(|&i| &self.entries[i])
    }

    /// Symbol whose code is exactly `code`.
    pub fn symbol_for(&self, code: Code) -> Option<char> {
        self.by_code.get(&code).copied()
    }

    /// Entries in builder order.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the counts the table was built from.
    pub fn total_symbols(&self) -> u64 {
        self.freqs.total()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// The counts the table was built from.
    ///
    /// Rebuilding from these yields an identical table.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    /// Symbol to bit string, zero-padded to the code length.
    pub fn export(&self) -> BTreeMap<char, String> {
        self.entries
            .iter()
            .map(|e| (e.symbol, e.code.to_bit_string()))
            .collect()
    }
}

impl PartialEq for EncodingTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for EncodingTable {}

/// Greedy left-to-right search for the most balanced split of `group`.
///
/// Returns an index in `[1, len)`. Scanning stops at the first candidate that
/// does not strictly improve on the previous one. The group's counts come from
/// one `FrequencyTable`, whose total fits in a `u64`, so the sums cannot
/// overflow.
fn split_point(group: &[CodeEntry]) -> usize {
    let total: u64 = group.iter().map(|e| e.count).sum();

    let mut left = 0u64;
    let mut best_diff = u64::MAX;
    let mut best = 1;

    for (i, entry) in group[..group.len() - 1].iter().enumerate() {
        left += entry.count;
        let diff = left.abs_diff(total - left);

        if diff >= best_diff {
            break;
        }

        best_diff = diff;
        best = i + 1;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn codes_of(table: &EncodingTable) -> BTreeMap<char, String> {
        table.export()
    }

    fn assert_prefix_free(table: &EncodingTable) {
        let entries = table.entries();
        for (i, a) in entries.iter().enumerate() {
            for (j, b) in entries.iter().enumerate() {
                if i != j {
                    assert!(
                        !a.code.is_prefix_of(&b.code),
                        "{:?}={} is a prefix of {:?}={}",
                        a.symbol,
                        a.code,
                        b.symbol,
                        b.code
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_table() {
        let table = EncodingTable::from_text("!my name is !ted", &CodecConfig::default()).unwrap();
        let codes = codes_of(&table);

        let expected: BTreeMap<char, String> = [
            (' ', "00"),
            ('!', "010"),
            ('e', "011"),
            ('m', "100"),
            ('a', "1010"),
            ('d', "1011"),
            ('i', "1100"),
            ('n', "1101"),
            ('s', "1110"),
            ('t', "11110"),
            ('y', "11111"),
        ]
        .into_iter()
        .map(|(c, s)| (c, s.to_string()))
        .collect();

        assert_eq!(codes, expected);
        assert_eq!(table.total_symbols(), 16);
        assert_eq!(table.max_code_len(), 5);
    }

    #[test]
    fn test_equal_counts_balanced() {
        let table = EncodingTable::from_text("!ted", &CodecConfig::default()).unwrap();
        assert_eq!(table.lookup('!').unwrap().to_bit_string(), "00");
        assert_eq!(table.lookup('d').unwrap().to_bit_string(), "01");
        assert_eq!(table.lookup('e').unwrap().to_bit_string(), "10");
        assert_eq!(table.lookup('t').unwrap().to_bit_string(), "11");
    }

    #[test]
    fn test_builder_order() {
        let table = EncodingTable::from_text("abracadabra", &CodecConfig::default()).unwrap();
        let order: Vec<char> = table.entries().iter().map(|e| e.symbol).collect();
        assert_eq!(order, vec!['a', 'b', 'r', 'c', 'd']);
        assert_eq!(table.lookup('a').unwrap().to_bit_string(), "0");
        assert_eq!(table.lookup('b').unwrap().to_bit_string(), "10");
        assert_eq!(table.lookup('r').unwrap().to_bit_string(), "110");
        assert_eq!(table.lookup('c').unwrap().to_bit_string(), "1110");
        assert_eq!(table.lookup('d').unwrap().to_bit_string(), "1111");
    }

    #[test]
    fn test_tie_break_by_symbol() {
        let freqs = FrequencyTable::from_counts([('d', 5), ('b', 5), ('c', 5), ('a', 5)]).unwrap();
        let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();

        let order: Vec<char> = table.entries().iter().map(|e| e.symbol).collect();
        assert_eq!(order, vec!['a', 'b', 'c', 'd']);
        assert_eq!(table.lookup('a').unwrap().to_bit_string(), "00");
        assert_eq!(table.lookup('d').unwrap().to_bit_string(), "11");
    }

    #[test]
    fn test_greedy_split_stops_on_tie() {
        // Imbalance goes 4 -> 0 -> 4: split after the second entry
        let freqs = FrequencyTable::from_counts([('a', 2), ('b', 2), ('c', 2), ('d', 2)]).unwrap();
        let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        assert!(table.entries().iter().all(|e| e.code.len() == 2));

        // Imbalance goes 1 -> 1: first candidate wins
        let freqs = FrequencyTable::from_counts([('x', 1), ('y', 1), ('z', 1)]).unwrap();
        let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        assert_eq!(table.lookup('x').unwrap().to_bit_string(), "0");
        assert_eq!(table.lookup('y').unwrap().to_bit_string(), "10");
        assert_eq!(table.lookup('z').unwrap().to_bit_string(), "11");
    }

    #[test]
    fn test_empty_table() {
        let table = EncodingTable::build(&FrequencyTable::new(), &CodecConfig::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_code_len(), 0);
        assert_eq!(table.total_symbols(), 0);
    }

    #[test]
    fn test_single_symbol_zero_length() {
        let table = EncodingTable::from_text("aaaa", &CodecConfig::default()).unwrap();
        assert_eq!(table.len(), 1);
        let code = table.lookup('a').unwrap();
        assert!(code.is_empty());
        assert_eq!(code.to_bit_string(), "");
        assert_eq!(table.symbol_for(Code::EMPTY), Some('a'));
        assert_eq!(table.total_symbols(), 4);
    }

    #[test]
    fn test_unknown_symbol() {
        let table = EncodingTable::from_text("abc", &CodecConfig::default()).unwrap();
        let err = table.lookup('z').unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Table(TableError::UnknownSymbol { symbol: 'z' })
        ));
    }

    #[test]
    fn test_code_too_long() {
        let config = CodecConfig::default().with_max_code_len(1);
        let err = EncodingTable::from_text("xyz", &config).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Table(TableError::CodeTooLong { length: 2, max: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CodecConfig::default().with_escape_marker('q');
        assert!(EncodingTable::from_text("abc", &config).is_err());
    }

    #[test]
    fn test_deep_skew_is_iterative() {
        // Doubling counts produce a chain one level deeper per symbol
        let freqs = FrequencyTable::from_counts(
            (0..40u32).map(|i| (char::from_u32('A' as u32 + i).unwrap(), 1u64 << i)),
        )
        .unwrap();
        let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        assert_eq!(table.max_code_len(), 39);
        assert_prefix_free(&table);
    }

    #[test]
    fn test_prefix_free_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let distinct = rng.gen_range(1..=60u32);
            let freqs = FrequencyTable::from_counts(
                (0..distinct).map(|i| (char::from_u32(0x21 + i).unwrap(), rng.gen_range(1..=500u64))),
            )
            .unwrap();
            let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
            assert_eq!(table.len(), freqs.len());
            assert_prefix_free(&table);
        }
    }

    #[test]
    fn test_deterministic() {
        let freqs = FrequencyTable::from_text("the quick brown fox jumps over the lazy dog");
        let a = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        let b = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.export(), b.export());
    }

    #[test]
    fn test_frequencies_rebuild() {
        let table = EncodingTable::from_text("mississippi", &CodecConfig::default()).unwrap();
        let rebuilt = EncodingTable::build(table.frequencies(), &CodecConfig::default()).unwrap();
        assert_eq!(table, rebuilt);
        assert_eq!(rebuilt.frequencies(), &FrequencyTable::from_text("mississippi"));
    }

    #[test]
    fn test_counts_near_u64_max() {
        let freqs = FrequencyTable::from_counts([
            ('a', u64::MAX / 2),
            ('b', u64::MAX / 4),
            ('c', u64::MAX / 4),
            ('d', 2),
        ])
        .unwrap();
        assert_eq!(freqs.total(), u64::MAX);

        let table = EncodingTable::build(&freqs, &CodecConfig::default()).unwrap();
        assert_eq!(table.total_symbols(), u64::MAX);
        assert_eq!(table.lookup('a').unwrap().to_bit_string(), "0");
        assert_prefix_free(&table);
    }

    #[test]
    fn test_code_child_keeps_all_64_bits() {
        let mut code = Code::EMPTY.child(true);
        for _ in 1..64 {
            code = code.child(false);
        }
        assert_eq!(code.len(), 64);
        assert_eq!(code.bits(), 1u64 << 63);
        assert!(code.to_bit_string().starts_with("10"));
    }

    #[test]
    fn test_code_prefix_and_display() {
        let a = Code::new(0b10, 2);
        let b = Code::new(0b101, 3);
        let c = Code::new(0b011, 3);
        assert!(a.is_prefix_of(&b));
        assert!(!a.is_prefix_of(&c));
        assert!(Code::EMPTY.is_prefix_of(&c));
        assert_eq!(Code::new(0b1, 4).to_string(), "0001");
        assert_eq!(Code::new(0xFF, 3).bits(), 0b111);
    }
}
