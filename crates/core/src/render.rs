//! Space-separated hex rendering of packed bytes.
//!
//! ```text
//! [0x53, 0xE6, 0x00]  <->  "53 E6 00"
//! ```
//!
//! Rendering always emits uppercase digits, one space between bytes and no
//! leading or trailing space. Parsing splits on any whitespace and accepts
//! either case, but every token must be exactly two hex digits.

use crate::error::{RenderError, Result};

/// Render `bytes` as `"XX XX ..."`.
pub fn render(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| hex::encode_upper([byte]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a rendered string back into bytes.
///
/// # Errors
/// `RenderError::InvalidToken` for the first token that is not exactly two
/// hex digits. Nothing is truncated or skipped.
pub fn parse(rendered: &str) -> Result<Vec<u8>> {
    rendered
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| -> Result<u8> {
            let mut byte = [0u8; 1];
            hex::decode_to_slice(token, &mut byte).map_err(|_| RenderError::InvalidToken {
                index,
                token: token.to_string(),
            })?;
            Ok(byte[0])
        })
        .collect()
}
