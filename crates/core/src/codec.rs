//! Encode text into a container and decode it back.
//!
//! Encode: text -> frequency table -> tree -> codes -> packed bits -> container.
//! Decode: container -> frequency table -> tree (rebuilt) -> tree walk -> text.
//!
//! Every call builds its own table, tree and codes; nothing is shared between
//! calls.

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codes::{self, Code, CodeTable};
use crate::container::{self, parse_container, serialize_container};
use crate::error::{ContainerError, Error, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{self, Node};

/// Everything derived from one text before packing.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub frequencies: FrequencyTable,
    pub tree: Node,
    pub codes: CodeTable,
}

impl Analysis {
    /// Count, build and generate codes for `text`.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyInput` for empty text
    /// - `ContainerError::UnrepresentableSymbol` if the text contains a
    ///   symbol the container cannot record
    pub fn of(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(HuffmanError::EmptyInput.into());
        }

        let frequencies = FrequencyTable::from_text(text);
        for symbol in frequencies.symbols() {
            container::check_representable(symbol)?;
        }

        let tree = tree::build(&frequencies)?;
        let codes = codes::generate(&tree);
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Total number of code bits for the analysed text, before padding.
    pub fn encoded_bits(&self) -> u64 {
        self.codes
            .iter()
            .map(|(&symbol, code)| self.frequencies.get(symbol) * code.len() as u64)
            .sum()
    }

    /// Code for every symbol of `text`, in order.
    fn codes_for<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Result<&'a Code>> + 'a {
        text.chars().map(move |symbol| {
            self.codes
                .get(symbol)
                .ok_or_else(|| Error::from(HuffmanError::MissingCode { symbol }))
        })
    }

    /// The concatenated code bits for `text`, without padding.
    ///
    /// # Errors
    /// `HuffmanError::MissingCode` if `text` holds a symbol this analysis never counted.
    pub fn bits(&self, text: &str) -> Result<Vec<bool>> {
        let mut bits = Vec::with_capacity(self.encoded_bits() as usize);
        for code in self.codes_for(text) {
            bits.extend_from_slice(code?.bits());
        }
        Ok(bits)
    }

    /// Pack `text` with this analysis and wrap it in a container.
    ///
    /// # Errors
    /// `HuffmanError::MissingCode` if `text` holds a symbol this analysis never counted.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_bits() as usize);
        for code in self.codes_for(text) {
            writer.write_code(code?);
        }
        let payload = writer.finish();

        debug!(
            symbols = self.frequencies.total(),
            distinct = self.frequencies.len(),
            bits = self.encoded_bits(),
            payload_bytes = payload.len(),
            "encoded text"
        );
        serialize_container(&self.frequencies, &payload)
    }
}

/// Compress `text` into container bytes.
///
/// # Errors
/// - `HuffmanError::EmptyInput` for empty text
/// - `ContainerError::UnrepresentableSymbol` for a colon or newline in the text
pub fn encode(text: &str) -> Result<Vec<u8>> {
    Analysis::of(text)?.encode(text)
}

/// The concatenated code bits for `text`, without padding.
pub fn encode_bits(text: &str) -> Result<Vec<bool>> {
    Analysis::of(text)?.bits(text)
}

/// Decompress container bytes back into text.
///
/// # Errors
/// - container parse errors (`ContainerError`)
/// - `HuffmanError::EmptyInput` if the frequency table is empty
/// - `HuffmanError::TruncatedPayload` / `InvalidCode` if the payload does
///   not hold every counted symbol
/// - `ContainerError::TrailingPayload` if whole bytes remain afterwards
pub fn decode(bytes: &[u8]) -> Result<String> {
    let container = parse_container(bytes)?;
    decode_payload(&container.frequencies, &container.payload)
}

/// Decode exactly `frequencies.total()` symbols from a packed payload.
///
/// Decoding stops by symbol count, never by bit exhaustion, so the zero
/// padding in the last byte is never read as data.
pub fn decode_payload(frequencies: &FrequencyTable, payload: &[u8]) -> Result<String> {
    let root = tree::build(frequencies)?;
    let expected = frequencies
        .checked_total()
        .ok_or(HuffmanError::WeightOverflow)?;
    let mut reader = BitReader::new(payload);
    // Each symbol costs at least one bit, so a forged count cannot over-allocate.
    let capacity = expected.min(payload.len() as u64 * 8) as usize;
    let mut text = String::with_capacity(capacity);

    for decoded in 0..expected {
        let symbol = next_symbol(&root, &mut reader).map_err(|err| match err {
            Error::BitIo(_) => HuffmanError::TruncatedPayload { expected, decoded }.into(),
            other => other,
        })?;
        text.push(symbol);
    }

    let used = reader.bytes_consumed();
    if used != payload.len() {
        return Err(ContainerError::TrailingPayload {
            expected: used,
            actual: payload.len(),
        }
        .into());
    }

    debug!(symbols = expected, payload_bytes = payload.len(), "decoded payload");
    Ok(text)
}

/// Walk from the root to a leaf, consuming one bit per edge.
fn next_symbol(root: &Node, reader: &mut BitReader<'_>) -> Result<char> {
    if let Node::Leaf { symbol, .. } = root {
        // Lone-leaf tree: every symbol is the single bit `0`.
        let position = reader.position();
        return match reader.read_bit()? {
            false => Ok(*symbol),
            true => Err(HuffmanError::InvalidCode { position }.into()),
        };
    }

    let mut node = root;
    loop {
        let position = reader.position();
        let bit = reader.read_bit()?;
        node = node
            .child(bit)
            .ok_or(HuffmanError::InvalidCode { position })?;
        if let Some(symbol) = node.symbol() {
            return Ok(symbol);
        }
    }
}
