//! Statistics for a single encode or decode call.
//!
//! Each call fills its own [`CodecMetrics`]; nothing is shared between calls.
//! The numbers show how much the escape convention lengthened the text, how
//! well the self-built table fits it and how much padding the byte boundary
//! cost.

use std::fmt;

use crate::packer::Packed;
use crate::table::EncodingTable;

/// Counters for one codec invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecMetrics {
    // === Text ===
    /// Characters in the caller's text
    pub input_chars: u64,

    /// UTF-8 bytes in the caller's text
    pub input_bytes: u64,

    /// Escape markers inserted (or consumed) by normalization
    pub escapes: u64,

    /// Symbols in the normalized text
    pub normalized_symbols: u64,

    // === Table ===
    /// Distinct symbols in the table
    pub distinct_symbols: u64,

    /// Longest code in the table
    pub max_code_len: u64,

    // === Packing ===
    /// Payload bits (excluding padding)
    pub packed_bits: u64,

    /// Bytes after padding
    pub packed_bytes: u64,

    /// Zero bits added to reach a byte boundary
    pub padding_bits: u64,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the caller-visible text and the escapes it needed.
    pub fn record_text(&mut self, text: &str, escapes: usize) {
        self.input_chars = text.chars().count() as u64;
        self.input_bytes = text.len() as u64;
        self.escapes = escapes as u64;
    }

    /// Record the table used for the call.
    pub fn record_table(&mut self, table: &EncodingTable) {
        self.distinct_symbols = table.len() as u64;
        self.max_code_len = table.max_code_len() as u64;
    }

    /// Record the packed payload.
    pub fn record_packed(&mut self, packed: &Packed) {
        self.normalized_symbols = packed.symbols as u64;
        self.packed_bits = packed.bit_len as u64;
        self.packed_bytes = packed.bytes.len() as u64;
        self.padding_bits = packed.padding_bits() as u64;
    }

    /// Compute compression ratio (packed bytes / input bytes).
    ///
    /// Returns 0.0 if the input was empty.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.packed_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length over the normalized text.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.normalized_symbols == 0 {
            0.0
        } else {
            self.packed_bits as f64 / self.normalized_symbols as f64
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_chars={}\n\
             input_bytes={}\n\
             escapes={}\n\
             normalized_symbols={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             packed_bits={}\n\
             packed_bytes={}\n\
             padding_bits={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n",
            self.input_chars,
            self.input_bytes,
            self.escapes,
            self.normalized_symbols,
            self.distinct_symbols,
            self.max_code_len,
            self.packed_bits,
            self.packed_bytes,
            self.padding_bits,
            self.compression_ratio(),
            self.bits_per_symbol(),
        )
    }
}

impl fmt::Display for CodecMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Codec Summary ===")?;
        writeln!(
            f,
            "Input: {} chars ({} bytes), {} escapes",
            self.input_chars, self.input_bytes, self.escapes
        )?;
        writeln!(
            f,
            "Table: {} symbols, longest code {} bits",
            self.distinct_symbols, self.max_code_len
        )?;
        writeln!(
            f,
            "Packed: {} bits in {} bytes ({} padding)",
            self.packed_bits, self.packed_bytes, self.padding_bits
        )?;
        write!(
            f,
            "Ratio: {:.1}%, {:.2} bits/symbol",
            self.compression_ratio() * 100.0,
            self.bits_per_symbol()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::packer::pack;

    #[test]
    fn test_ratios_empty() {
        let metrics = CodecMetrics::new();
        assert_eq!(metrics.compression_ratio(), 0.0);
        assert_eq!(metrics.bits_per_symbol(), 0.0);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = CodecMetrics::new();
        metrics.input_bytes = 1000;
        metrics.packed_bytes = 750;
        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_record_pipeline() {
        let table = EncodingTable::from_text("!my name is !ted", &CodecConfig::default()).unwrap();
        let packed = pack("!my name is !ted", &table).unwrap();

        let mut metrics = CodecMetrics::new();
        metrics.record_text("My name is Ted", 2);
        metrics.record_table(&table);
        metrics.record_packed(&packed);

        assert_eq!(metrics.input_chars, 14);
        assert_eq!(metrics.normalized_symbols, 16);
        assert_eq!(metrics.distinct_symbols, 11);
        assert_eq!(metrics.max_code_len, 5);
        assert_eq!(metrics.packed_bits, 54);
        assert_eq!(metrics.packed_bytes, 7);
        assert_eq!(metrics.padding_bits, 2);
        assert_eq!(metrics.bits_per_symbol(), 54.0 / 16.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = CodecMetrics::new();
        metrics.input_bytes = 10;
        metrics.packed_bytes = 5;
        metrics.escapes = 2;

        let text = metrics.export_text();
        assert!(text.contains("input_bytes=10"));
        assert!(text.contains("escapes=2"));
        assert!(text.contains("compression_ratio=0.5000"));
    }

    #[test]
    fn test_display() {
        let summary = CodecMetrics::new().to_string();
        assert!(summary.starts_with("=== Codec Summary ==="));
        assert!(summary.contains("Packed: 0 bits in 0 bytes"));
    }
}
