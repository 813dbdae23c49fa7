//! Error types for the prefix-code codec.
//!
//! Every operation returns a structured error instead of panicking. The
//! per-domain enums below are folded into the top-level [`Error`], and
//! [`Error::kind`] classifies any error into the coarse failure taxonomy a
//! caller usually branches on.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Normalize: case-escape decoding
/// - Table: code table construction and symbol lookup
/// - Decode: walking a packed bit stream against a table
/// - Render: parsing the space-separated hex form
/// - Header: out-of-band table header parsing
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Escape marker handling failed while restoring text
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Code table could not be built or queried
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Packed bits could not be decoded with the supplied table
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Rendered hex string is malformed
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Table header is malformed
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// CRC validation of a table header failed
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Escape marker without a following character
    NormalizationFailure,
    /// Symbol absent from the encoding table while packing
    LookupFailure,
    /// Malformed hex token in a rendered string
    ParseFailure,
    /// No prefix code matches the remaining bits
    AmbiguousDecode,
    /// Data and table do not belong together
    TableMismatch,
    /// Symbol counts or a table header failed structural or CRC checks
    Corrupt,
    /// Invalid codec configuration
    Config,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Normalize(_) => ErrorKind::NormalizationFailure,
            Error::Table(TableError::UnknownSymbol { .. }) => ErrorKind::LookupFailure,
            Error::Table(TableError::CodeTooLong { .. }) => ErrorKind::Config,
            Error::Table(TableError::CountOverflow { .. }) => ErrorKind::Corrupt,
            Error::Render(_) => ErrorKind::ParseFailure,
            Error::Decode(DecodeError::InvalidCode { .. })
            | Error::Decode(DecodeError::Truncated { .. })
            | Error::BitIo(_) => ErrorKind::AmbiguousDecode,
            Error::Decode(DecodeError::TrailingBits { .. })
            | Error::Decode(DecodeError::EmptyTable { .. })
            | Error::Decode(DecodeError::TooManySymbols { .. }) => ErrorKind::TableMismatch,
            Error::Header(_) | Error::Crc { .. } => ErrorKind::Corrupt,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Code wider than the 64-bit accumulator
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Text normalization errors.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The escape marker is the last character, nothing left to uppercase
    #[error("escape marker {marker:?} at char {position} has no following character")]
    DanglingEscape { marker: char, position: usize },
}

/// Code table errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// Symbol has no entry in the table
    #[error("symbol {symbol:?} is not in the encoding table")]
    UnknownSymbol { symbol: char },

    /// The bisection produced a code longer than the configured limit
    #[error("code for {symbol:?} would be {length} bits, limit is {max}")]
    CodeTooLong { symbol: char, length: usize, max: u8 },

    /// Adding a count would push the total past `u64::MAX`
    #[error("count for {symbol:?} overflows the symbol total")]
    CountOverflow { symbol: char },
}

/// Bit stream decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No table code matches the bits starting at this position
    #[error("no code matches bits at position {position}")]
    InvalidCode { position: usize },

    /// Bit stream ended before the expected symbol count was reached
    #[error("bit stream truncated: expected {expected} symbols, decoded {decoded}")]
    Truncated { expected: usize, decoded: usize },

    /// Bits left over after the expected symbols are not zero padding
    #[error("{remaining} trailing bits after {decoded} symbols are not zero padding")]
    TrailingBits { decoded: usize, remaining: usize },

    /// Table has no codes but symbols were requested
    #[error("empty table cannot decode {expected} symbols")]
    EmptyTable { expected: usize },

    /// Table expects more symbols than this process can hold
    #[error("table expects {expected} symbols, too many to decode")]
    TooManySymbols { expected: u64 },
}

/// Hex rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Token is not exactly two hex digits
    #[error("invalid hex token {token:?} at index {index}")]
    InvalidToken { index: usize, token: String },
}

/// Table header errors.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Header is too short to contain the fixed fields
    #[error("header too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Entry section length doesn't match the declared entry count
    #[error("entry length mismatch: header says {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Entry carries a value that is not a Unicode scalar
    #[error("entry {index} has invalid code point {value:#x}")]
    InvalidSymbol { index: usize, value: u32 },

    /// Entry carries a zero count
    #[error("entry {index} for {symbol:?} has zero count")]
    ZeroCount { index: usize, symbol: char },

    /// Symbol appears more than once
    #[error("entry {index} repeats symbol {symbol:?}")]
    DuplicateSymbol { index: usize, symbol: char },

    /// Entry counts sum past `u64::MAX`
    #[error("entry {index} for {symbol:?} overflows the symbol total")]
    CountOverflow { index: usize, symbol: char },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
