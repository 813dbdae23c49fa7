//! Packing normalized text into a prefix-coded bit stream and back.
//!
//! # Termination
//!
//! The packed bytes carry no length or end marker, and zero padding can look
//! exactly like a run of short all-zero codes. The unpacker therefore takes
//! the number of symbols to decode. Once that many symbols are out, whatever
//! is left must be fewer than 8 bits and all zero; anything else means the
//! data was packed with a different table (or a different text).

use crate::bitio::{BitReader, BitWriter};
use crate::error::{DecodeError, Error, Result};
use crate::table::{Code, EncodingTable};

/// Result of packing: the padded bytes plus the exact payload size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    /// Bit stream, zero padded to a byte boundary
    pub bytes: Vec<u8>,
    /// Number of payload bits (excluding padding)
    pub bit_len: usize,
    /// Number of symbols packed
    pub symbols: usize,
}

impl Packed {
    /// Zero bits appended to reach the byte boundary.
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }
}

/// Concatenate the codes of every symbol of `normalized`, in order.
///
/// # Errors
/// `TableError::UnknownSymbol` for the first symbol the table lacks.
pub fn pack(normalized: &str, table: &EncodingTable) -> Result<Packed> {
    let mut writer = BitWriter::with_capacity(normalized.len() * table.max_code_len().max(1));
    let mut symbols = 0;

    for symbol in normalized.chars() {
        writer.write_code(table.lookup(symbol)?)?;
        symbols += 1;
    }

    let bit_len = writer.bit_len();

    Ok(Packed {
        bytes: writer.finish(),
        bit_len,
        symbols,
    })
}

/// The unpadded bit stream for `normalized` as '0'/'1' characters.
pub fn bit_string(normalized: &str, table: &EncodingTable) -> Result<String> {
    let mut out = String::new();
    for symbol in normalized.chars() {
        out.push_str(&table.lookup(symbol)?.to_bit_string());
    }
    Ok(out)
}

/// Decode exactly `symbols` symbols from `bytes`.
///
/// Bits are accumulated one at a time until they spell a code of the table;
/// the table is prefix-free so the first hit is the only one.
///
/// # Errors
/// - `DecodeError::EmptyTable` if symbols are requested from an empty table
/// - `DecodeError::InvalidCode` if no code matches within the longest code
///   length. Tables from the builder form a complete code tree, so only a
///   table assembled some other way can hit this.
/// - `DecodeError::Truncated` if the bits run out mid-stream, or if `bytes`
///   holds fewer bits than `symbols` needs at one bit apiece
/// - `DecodeError::TooManySymbols` if the output cannot be allocated
/// - `DecodeError::TrailingBits` if the tail is not short zero padding
pub fn unpack(bytes: &[u8], table: &EncodingTable, symbols: usize) -> Result<String> {
    unpack_counted(bytes, table, symbols).map(|(normalized, _)| normalized)
}

/// Like [`unpack`], but also reports the payload the symbols occupied.
///
/// The returned [`Packed`] is what [`pack`] would have produced for the
/// decoded text.
pub fn unpack_packed(
    bytes: &[u8],
    table: &EncodingTable,
    symbols: usize,
) -> Result<(String, Packed)> {
    let (normalized, bit_len) = unpack_counted(bytes, table, symbols)?;
    let packed = Packed {
        bytes: bytes.to_vec(),
        bit_len,
        symbols,
    };
    Ok((normalized, packed))
}

fn unpack_counted(bytes: &[u8], table: &EncodingTable, symbols: usize) -> Result<(String, usize)> {
    if table.is_empty() && symbols > 0 {
        return Err(DecodeError::EmptyTable { expected: symbols }.into());
    }

    let max_len = table.max_code_len();
    if max_len > 0 && symbols > bytes.len().saturating_mul(8) {
        return Err(DecodeError::Truncated {
            expected: symbols,
            decoded: 0,
        }
        .into());
    }

    // Zero-length codes decode from no bits at all, so `symbols` is unbounded there
    let mut out = String::new();
    out.try_reserve(symbols)
        .map_err(|_| DecodeError::TooManySymbols {
            expected: symbols as u64,
        })?;

    let mut reader = BitReader::new(bytes);

    for decoded in 0..symbols {
        let start = reader.position();
        let mut code = Code::EMPTY;

        let symbol = loop {
            if let Some(symbol) = table.symbol_for(code) {
                break symbol;
            }
            if code.len() >= max_len {
                return Err(DecodeError::InvalidCode { position: start }.into());
            }

            let bit = reader.read_bit().map_err(|err| match err {
                Error::BitIo(_) => Error::from(DecodeError::Truncated {
                    expected: symbols,
                    decoded,
                }),
                other => other,
            })?;
            code = code.child(bit);
        };

        out.push(symbol);
    }

    let bit_len = reader.position();
    let remaining = reader.bits_remaining();
    if remaining >= 8 || !reader.rest_is_zero() {
        return Err(DecodeError::TrailingBits {
            decoded: symbols,
            remaining,
        }
        .into());
    }

    Ok((out, bit_len))
}
