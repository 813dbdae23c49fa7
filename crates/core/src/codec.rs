//! Codec facade: normalize, build, pack, render and the way back.
//!
//! ```text
//! encode: text -> normalize -> FrequencyTable -> EncodingTable -> pack -> render
//! decode: rendered -> parse -> unpack (with table) -> denormalize -> text
//! ```
//!
//! The rendered string carries no table. [`encode`] therefore hands the
//! self-built table back in [`Encoded`], and [`decode`] needs it (or an
//! identical one rebuilt from [`Encoded::table_header`]).

use crate::config::CodecConfig;
use crate::error::{DecodeError, Result};
use crate::header::{parse_table_header, serialize_table_header};
use crate::metrics::CodecMetrics;
use crate::normalize::{denormalize, escape_count, normalize};
use crate::packer::{pack, unpack, unpack_packed, Packed};
use crate::render::{parse, render};
use crate::table::EncodingTable;

/// Turns text into packed bytes.
pub trait Encoder {
    fn encode(&self, text: &str) -> Result<Vec<u8>>;
}

/// Turns packed bytes back into text.
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<String>;
}

/// A prefix-code codec bound to one encoding table.
///
/// As a [`Decoder`] it expects exactly as many symbols as the table was built
/// from, which is the case for text the table was built for. Use
/// [`Codec::decode_symbols`] for other texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    table: EncodingTable,
    config: CodecConfig,
}

impl Codec {
    /// Wrap an existing table with the default configuration.
    pub fn new(table: EncodingTable) -> Self {
        Self {
            table,
            config: CodecConfig::default(),
        }
    }

    /// Wrap an existing table with a custom configuration.
    pub fn with_config(table: EncodingTable, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// Build a codec whose table comes from the normalized form of `text`.
    pub fn for_text(text: &str, config: CodecConfig) -> Result<Self> {
        let table = EncodingTable::from_text(&normalize(text, &config), &config)?;
        Ok(Self { table, config })
    }

    /// Rebuild a codec from a table header produced by [`Codec::table_header`].
    pub fn from_header(header: &[u8], config: CodecConfig) -> Result<Self> {
        let freqs = parse_table_header(header)?;
        let table = EncodingTable::build(&freqs, &config)?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize the table's frequencies for out-of-band transport.
    pub fn table_header(&self) -> Vec<u8> {
        serialize_table_header(self.table.frequencies())
    }

    /// Normalize and pack `text`, keeping the payload size.
    pub fn pack(&self, text: &str) -> Result<Packed> {
        pack(&normalize(text, &self.config), &self.table)
    }

    /// Decode `symbols` normalized symbols and restore case.
    pub fn decode_symbols(&self, bytes: &[u8], symbols: usize) -> Result<String> {
        let normalized = unpack(bytes, &self.table, symbols)?;
        denormalize(&normalized, &self.config)
    }

    /// Encode and render as `"XX XX ..."`.
    pub fn encode_rendered(&self, text: &str) -> Result<String> {
        Ok(render(&self.encode(text)?))
    }

    /// Parse a rendered string and decode it.
    pub fn decode_rendered(&self, rendered: &str) -> Result<String> {
        self.decode(&parse(rendered)?)
    }
}

impl Encoder for Codec {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(self.pack(text)?.bytes)
    }
}

impl Decoder for Codec {
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.decode_symbols(bytes, expected_symbols(&self.table)?)
    }
}

/// Output of [`encode`]: the rendered bytes plus the table needed to read them.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Space-separated uppercase hex
    pub rendered: String,
    /// Table built from this text's own statistics
    pub table: EncodingTable,
    pub metrics: CodecMetrics,
}

impl Encoded {
    /// Table header to send alongside `rendered`.
    pub fn table_header(&self) -> Vec<u8> {
        serialize_table_header(self.table.frequencies())
    }
}

/// Output of [`decode_with_metrics`]: the restored text and what it took.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    pub metrics: CodecMetrics,
}

/// Encode `text` with the default configuration.
pub fn encode(text: &str) -> Result<Encoded> {
    encode_with(text, &CodecConfig::default())
}

/// Encode `text`, building a fresh table from its normalized form.
pub fn encode_with(text: &str, config: &CodecConfig) -> Result<Encoded> {
    config.validate()?;

    let normalized = normalize(text, config);
    let table = EncodingTable::from_text(&normalized, config)?;
    let packed = pack(&normalized, &table)?;

    let mut metrics = CodecMetrics::new();
    metrics.record_text(text, escape_count(text, config));
    metrics.record_table(&table);
    metrics.record_packed(&packed);

    Ok(Encoded {
        rendered: render(&packed.bytes),
        table,
        metrics,
    })
}

/// Decode a rendered string with the table its encoder built.
pub fn decode(rendered: &str, table: &EncodingTable) -> Result<String> {
    decode_with(rendered, table, &CodecConfig::default())
}

/// Decode a rendered string with a custom configuration.
pub fn decode_with(rendered: &str, table: &EncodingTable, config: &CodecConfig) -> Result<String> {
    Ok(decode_with_metrics(rendered, table, config)?.text)
}

/// Decode a rendered string and collect the same counters [`encode_with`]
/// reports.
pub fn decode_with_metrics(
    rendered: &str,
    table: &EncodingTable,
    config: &CodecConfig,
) -> Result<Decoded> {
    config.validate()?;

    let bytes = parse(rendered)?;
    let (normalized, packed) = unpack_packed(&bytes, table, expected_symbols(table)?)?;
    let text = denormalize(&normalized, config)?;

    let mut metrics = CodecMetrics::new();
    metrics.record_text(&text, escape_count(&text, config));
    metrics.record_table(table);
    metrics.record_packed(&packed);

    Ok(Decoded { text, metrics })
}

/// Number of symbols a self-built table decodes: the sum of its counts.
fn expected_symbols(table: &EncodingTable) -> Result<usize> {
    let total = table.total_symbols();
    usize::try_from(total).map_err(|_| DecodeError::TooManySymbols { expected: total }.into())
}
