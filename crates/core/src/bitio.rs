//! Bit-level I/O for packing prefix codes into bytes.
//!
//! Both directions are MSB-first: the first bit of a code lands in the most
//! significant free bit of the current byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with zero bits on the low side
//! - BitReader: cannot tell padding from data; the unpacker decides where
//!   the payload ends from the expected symbol count
//!
//! # Example
//! ```
//! use vlc_core::bitio::{BitReader, BitWriter};
//! use vlc_core::table::Code;
//!
//! let mut writer = BitWriter::new();
//! writer.write_code(Code::new(0b101, 3)).unwrap();
//! writer.write_code(Code::new(0b11, 2)).unwrap();
//! assert_eq!(writer.bit_len(), 5);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! ```

use crate::error::{BitIoError, Result};
use crate::table::Code;

/// Accumulates bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending` holds `filled` bits, left-aligned
/// - `filled` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    pending: u8,
    filled: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with room for `bits` bits before reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            pending: 0,
            filled: 0,
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= 0x80 >> self.filled;
        }
        self.filled += 1;

        if self.filled == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.filled = 0;
        }
    }

    /// Append the low `count` bits of `value`, highest of them first.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count > 64`.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }

        Ok(())
    }

    /// Append a whole prefix code.
    pub fn write_code(&mut self, code: Code) -> Result<()> {
        self.write_bits(code.bits(), code.len())
    }

    /// Total bits written so far, excluding padding.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.filled as usize
    }

    /// Flush the partial byte (zero padded) and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Reads bits MSB-first from a byte slice.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read the next bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Bits not yet consumed.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Index of the next bit to read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Whether every unread bit is zero.
    pub fn rest_is_zero(&self) -> bool {
        let byte_idx = self.position / 8;
        let offset = self.position % 8;

        let Some((&first, rest)) = self.data[byte_idx.min(self.data.len())..].split_first() else {
            return true;
        };

        let head_mask = 0xFFu8 >> offset;
        first & head_mask == 0 && rest.iter().all(|&b| b == 0)
    }
}
