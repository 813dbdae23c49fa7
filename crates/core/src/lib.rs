//! vlc-core: variable-length prefix-code text codec
//!
//! Each distinct character of a text gets a prefix-free bit pattern whose
//! length shrinks as the character gets more frequent. The patterns are packed
//! into bytes and rendered as space-separated uppercase hex:
//!
//! ```
//! let encoded = vlc_core::encode("My name is Ted").unwrap();
//! assert_eq!(encoded.rendered, "53 E6 D4 66 70 BC EC");
//!
//! let text = vlc_core::decode(&encoded.rendered, &encoded.table).unwrap();
//! assert_eq!(text, "My name is Ted");
//! ```
//!
//! # Architecture
//!
//! - `normalize`: uppercase letters become escape marker + lowercase
//! - `frequency`: per-symbol counts of the normalized text
//! - `table`: Shannon-Fano bisection over the sorted counts
//! - `bitio`: MSB-first bit writer/reader
//! - `packer`: codes in, bytes out (and back, given a symbol count)
//! - `render`: bytes to `"XX XX ..."` and back
//! - `header`: CRC-checked frequency header for sharing a table out of band
//! - `codec`: the `Encoder`/`Decoder` traits and the `encode`/`decode` facade
//! - `metrics`: per-call statistics
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Call-scoped tables**: Every encode builds its own table; nothing global
//! - **Deterministic**: Identical counts always give identical codes

pub mod bitio;
pub mod codec;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod metrics;
pub mod normalize;
pub mod packer;
pub mod render;
pub mod sample;
pub mod table;

// Re-export commonly used types
pub use codec::{
    decode, decode_with, decode_with_metrics, encode, encode_with, Codec, Decoded, Decoder, Encoded,
    Encoder,
};
pub use config::CodecConfig;
pub use error::{Error, ErrorKind, Result};
pub use frequency::FrequencyTable;
pub use table::{Code, CodeEntry, EncodingTable};
