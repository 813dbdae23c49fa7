//! Codec configuration.
//!
//! The codec works with zero configuration: [`CodecConfig::default`] uses
//! `!` as the uppercase escape marker and allows codes up to 64 bits.

use crate::error::{Error, Result};

/// Default uppercase escape marker.
pub const DEFAULT_ESCAPE_MARKER: char = '!';

/// Longest code that fits the 64-bit code accumulator.
pub const MAX_CODE_LEN: u8 = 64;

/// Settings shared by the normalizer, the table builder and the unpacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Character that announces "uppercase the next character"
    pub escape_marker: char,

    /// Longest code the builder may assign and the unpacker will try
    pub max_code_len: u8,
}

impl CodecConfig {
    /// Replace the escape marker.
    pub fn with_escape_marker(mut self, marker: char) -> Self {
        self.escape_marker = marker;
        self
    }

    /// Replace the code length limit.
    pub fn with_max_code_len(mut self, max_code_len: u8) -> Self {
        self.max_code_len = max_code_len;
        self
    }

    /// Check that the settings can produce a reversible codec.
    ///
    /// # Errors
    /// `Error::Config` if the marker is a letter, whitespace or has a distinct
    /// uppercase form, or if the code length limit is outside `1..=64`.
    pub fn validate(&self) -> Result<()> {
        if self.escape_marker.is_alphabetic() {
            return Err(Error::Config(format!(
                "escape marker {:?} must not be a letter",
                self.escape_marker
            )));
        }
        if self.escape_marker.is_whitespace() {
            return Err(Error::Config(format!(
                "escape marker {:?} must not be whitespace",
                self.escape_marker
            )));
        }
        if !self.escape_marker.to_uppercase().eq(std::iter::once(self.escape_marker)) {
            return Err(Error::Config(format!(
                "escape marker {:?} must be its own uppercase",
                self.escape_marker
            )));
        }
        if self.max_code_len == 0 || self.max_code_len > MAX_CODE_LEN {
            return Err(Error::Config(format!(
                "max code length {} outside 1..={}",
                self.max_code_len, MAX_CODE_LEN
            )));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            escape_marker: DEFAULT_ESCAPE_MARKER,
            max_code_len: MAX_CODE_LEN,
        }
    }
}
