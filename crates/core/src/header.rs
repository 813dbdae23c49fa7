//! Binary header for sharing a frequency table out of band.
//!
//! The rendered hex string never embeds a table. When the decoding side
//! cannot rebuild the table on its own, the encoder ships this header through
//! whatever channel it likes; the receiver parses it and runs the same
//! deterministic builder, arriving at an identical table.
//!
//! # Header Format
//!
//! ```text
//! +--------------------+
//! | Magic (4 bytes)    |  0x53 0x46 0x54 0x31 ("SFT1")
//! +--------------------+
//! | entry_count (4)    |  u32 little-endian
//! +--------------------+
//! | crc32 (4)          |  u32 checksum of entry_count and entries
//! +--------------------+
//! | entries            |  entry_count x 12 bytes:
//! | (variable)         |    code point u32 LE, count u64 LE
//! +--------------------+
//! ```
//!
//! Entries are written by ascending code point.

use std::collections::HashSet;

use crate::error::{Error, HeaderError, Result};
use crate::frequency::FrequencyTable;

/// Magic number for table headers: "SFT1"
const MAGIC: [u8; 4] = [0x53, 0x46, 0x54, 0x31];

/// Size of the fixed part of the header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of one serialized entry in bytes
pub const ENTRY_SIZE: usize = 12;

/// Serialize `freqs` into a table header.
pub fn serialize_table_header(freqs: &FrequencyTable) -> Vec<u8> {
    let mut entries = Vec::with_capacity(freqs.len() * ENTRY_SIZE);
    for (symbol, count) in freqs.iter() {
        entries.extend_from_slice(&(symbol as u32).to_le_bytes());
        entries.extend_from_slice(&count.to_le_bytes());
    }

    let entry_count = freqs.len() as u32;
    let crc32 = compute_crc(entry_count, &entries);

    let mut header = Vec::with_capacity(HEADER_SIZE + entries.len());
    header.extend_from_slice(&MAGIC);
    header.extend_from_slice(&entry_count.to_le_bytes());
    header.extend_from_slice(&crc32.to_le_bytes());
    header.extend_from_slice(&entries);

    header
}

/// Parse a table header back into a frequency table.
///
/// # Errors
/// - `HeaderError::TooShort` / `HeaderError::LengthMismatch` on size problems
/// - `HeaderError::InvalidMagic` if the magic number doesn't match
/// - `Error::Crc` if the checksum fails
/// - `HeaderError::InvalidSymbol`, `ZeroCount`, `DuplicateSymbol` for bad entries
/// - `HeaderError::CountOverflow` if the counts sum past `u64::MAX`
pub fn parse_table_header(bytes: &[u8]) -> Result<FrequencyTable> {
    if bytes.len() < HEADER_SIZE {
        return Err(HeaderError::TooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let (magic, rest) = split_array::<4>(bytes);
    if magic != MAGIC {
        return Err(HeaderError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let (count_bytes, rest) = split_array::<4>(rest);
    let (crc_bytes, entries) = split_array::<4>(rest);
    let entry_count = u32::from_le_bytes(count_bytes);
    let crc32 = u32::from_le_bytes(crc_bytes);

    let expected_len = usize::try_from(entry_count)
        .ok()
        .and_then(|count| count.checked_mul(ENTRY_SIZE))
        .unwrap_or(usize::MAX);
    if entries.len() != expected_len {
        return Err(HeaderError::LengthMismatch {
            expected: expected_len,
            actual: entries.len(),
        }
        .into());
    }

    let computed = compute_crc(entry_count, entries);
    if computed != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed,
        });
    }

    let mut seen = HashSet::with_capacity(entries.len() / ENTRY_SIZE);
    let mut freqs = FrequencyTable::new();

    for (index, entry) in entries.chunks_exact(ENTRY_SIZE).enumerate() {
        let (point_bytes, rest) = split_array::<4>(entry);
        let (count_bytes, _) = split_array::<8>(rest);
        let value = u32::from_le_bytes(point_bytes);
        let count = u64::from_le_bytes(count_bytes);

        let symbol =
            char::from_u32(value).ok_or(HeaderError::InvalidSymbol { index, value })?;
        if count == 0 {
            return Err(HeaderError::ZeroCount { index, symbol }.into());
        }
        if !seen.insert(symbol) {
            return Err(HeaderError::DuplicateSymbol { index, symbol }.into());
        }

        freqs
            .add(symbol, count)
            .map_err(|_| HeaderError::CountOverflow { index, symbol })?;
    }

    Ok(freqs)
}

/// Split `N` leading bytes off a slice the caller has already length-checked.
fn split_array<const N: usize>(bytes: &[u8]) -> ([u8; N], &[u8]) {
    let (head, tail) = bytes.split_at(N);
    let mut array = [0u8; N];
    array.copy_from_slice(head);
    (array, tail)
}

/// CRC32 over the entry count and the entry bytes.
fn compute_crc(entry_count: u32, entries: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&entry_count.to_le_bytes());
    hasher.update(entries);
    hasher.finalize()
}
