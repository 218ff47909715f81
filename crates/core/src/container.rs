//! Container serialization and parsing.
//!
//! A container packages the frequency table with the packed code bits. The
//! tree itself is not stored; it is rebuilt from the table on decode.
//!
//! # Container Format
//!
//! ```text
//! +------------------------------+
//! | frequency text (UTF-8)       |  "sym:count sym:count ..."
//! +------------------------------+
//! | '\n' (1 byte)                |  delimiter
//! +------------------------------+
//! | payload                      |  packed code bits, MSB-first,
//! | (until EOF)                  |  last byte zero-padded
//! +------------------------------+
//! ```
//!
//! Entries are written in ascending symbol order and separated by a single
//! space. The space symbol itself is written with an empty left-hand side
//! (`:count`). A colon or newline symbol cannot be written in this scheme and
//! is rejected up front.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ContainerError, Result};
use crate::frequency::FrequencyTable;

/// Separates the frequency text from the payload.
const DELIMITER: u8 = b'\n';

/// Separates `symbol` from `count` inside one entry.
const FIELD_SEPARATOR: char = ':';

/// Separates entries from each other.
const ENTRY_SEPARATOR: char = ' ';

/// A parsed container: the table needed to rebuild the tree plus the packed bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub frequencies: FrequencyTable,

    /// Packed code bits, including zero padding in the last byte
    pub payload: Vec<u8>,
}

impl Container {
    pub fn new(frequencies: FrequencyTable, payload: Vec<u8>) -> Self {
        Self {
            frequencies,
            payload,
        }
    }

    /// Serialize this container. See [`serialize_container`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize_container(&self.frequencies, &self.payload)
    }

    /// Parse a container. See [`parse_container`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        parse_container(bytes)
    }
}

/// Check that `symbol` survives the `symbol:count` text form.
pub fn check_representable(symbol: char) -> Result<()> {
    if symbol == FIELD_SEPARATOR || symbol == DELIMITER as char {
        return Err(ContainerError::UnrepresentableSymbol { symbol }.into());
    }
    Ok(())
}

/// Render the frequency table as `symbol:count` entries.
///
/// # Errors
/// `ContainerError::UnrepresentableSymbol` for a colon or newline symbol.
pub fn frequency_text(frequencies: &FrequencyTable) -> Result<String> {
    let mut text = String::new();
    for (index, (&symbol, &count)) in frequencies.iter().enumerate() {
        check_representable(symbol)?;
        if index > 0 {
            text.push(ENTRY_SEPARATOR);
        }
        if symbol != ENTRY_SEPARATOR {
            text.push(symbol);
        }
        text.push(FIELD_SEPARATOR);
        text.push_str(&count.to_string());
    }
    Ok(text)
}

/// Serialize a frequency table and packed payload into container bytes.
///
/// # Errors
/// `ContainerError::UnrepresentableSymbol` if any symbol collides with the
/// delimiters; nothing is written in that case.
pub fn serialize_container(frequencies: &FrequencyTable, payload: &[u8]) -> Result<Vec<u8>> {
    let text = frequency_text(frequencies)?;

    let mut bytes = Vec::with_capacity(text.len() + 1 + payload.len());
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(DELIMITER);
    bytes.extend_from_slice(payload);

    debug!(
        table_bytes = text.len(),
        payload_bytes = payload.len(),
        "serialized container"
    );
    Ok(bytes)
}

/// Parse container bytes into a frequency table and payload.
///
/// The payload is returned as-is; padding and length checks happen while
/// decoding, where the symbol count is known.
///
/// # Errors
/// - `ContainerError::MissingDelimiter` if there is no `'\n'`
/// - `ContainerError::InvalidUtf8` if the frequency text is not UTF-8
/// - `ContainerError::MalformedEntry`, `InvalidCount` or `DuplicateSymbol`
///   for a bad `symbol:count` entry
/// - `ContainerError::CountOverflow` if the counts sum past `u64::MAX`
pub fn parse_container(bytes: &[u8]) -> Result<Container> {
    let split = bytes
        .iter()
        .position(|&byte| byte == DELIMITER)
        .ok_or(ContainerError::MissingDelimiter)?;

    let text = std::str::from_utf8(&bytes[..split]).map_err(|_| ContainerError::InvalidUtf8)?;
    let frequencies = parse_frequency_text(text)?;
    let payload = bytes[split + 1..].to_vec();

    debug!(
        symbols = frequencies.len(),
        total = frequencies.total(),
        payload_bytes = payload.len(),
        "parsed container"
    );
    Ok(Container {
        frequencies,
        payload,
    })
}

/// Parse `symbol:count` entries separated by single spaces.
///
/// An empty text yields an empty table.
pub fn parse_frequency_text(text: &str) -> Result<FrequencyTable> {
    if text.is_empty() {
        return Ok(FrequencyTable::default());
    }

    let mut entries = BTreeMap::new();
    let mut total = 0u64;
    for entry in text.split(ENTRY_SEPARATOR) {
        let (symbol, count) = parse_entry(entry)?;
        if entries.insert(symbol, count).is_some() {
            return Err(ContainerError::DuplicateSymbol { symbol }.into());
        }
        // Every merged weight is bounded by this total, so tree building cannot overflow.
        total = total
            .checked_add(count)
            .ok_or(ContainerError::CountOverflow)?;
    }

    Ok(FrequencyTable::from_counts(entries))
}

fn parse_entry(entry: &str) -> Result<(char, u64)> {
    let malformed = || ContainerError::MalformedEntry {
        entry: entry.to_string(),
    };

    if entry.matches(FIELD_SEPARATOR).count() != 1 {
        return Err(malformed().into());
    }
    let (lhs, rhs) = entry.split_once(FIELD_SEPARATOR).ok_or_else(malformed)?;

    let mut chars = lhs.chars();
    let symbol = match (chars.next(), chars.next()) {
        (None, _) => ENTRY_SEPARATOR,
        (Some(symbol), None) => symbol,
        (Some(_), Some(_)) => return Err(malformed().into()),
    };

    let invalid_count = || ContainerError::InvalidCount {
        entry: entry.to_string(),
    };
    if rhs.is_empty() || !rhs.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid_count().into());
    }
    let count: u64 = rhs.parse().map_err(|_| invalid_count())?;
    if count == 0 {
        return Err(invalid_count().into());
    }

    Ok((symbol, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_serialize_layout() {
        let table = FrequencyTable::from_text("abb");
        let bytes = serialize_container(&table, &[0x60]).unwrap();
        assert_eq!(bytes, b"a:1 b:2\n\x60".to_vec());
    }

    #[test]
    fn test_space_symbol_has_empty_lhs() {
        let table = FrequencyTable::from_text("a a");
        assert_eq!(frequency_text(&table).unwrap(), ":1 a:2");
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let table = FrequencyTable::from_text("hello, world!\tmixed\r ünïcödé");
        let payload = vec![0xDE, 0xAD, 0x0A, 0xBE, 0xEF];

        let bytes = serialize_container(&table, &payload).unwrap();
        let container = parse_container(&bytes).unwrap();

        assert_eq!(container.frequencies, table);
        assert_eq!(container.payload, payload);
    }

    #[test]
    fn test_payload_may_contain_newlines() {
        let table = FrequencyTable::from_text("xy");
        let payload = vec![b'\n', b'\n', b':'];
        let container = Container::new(table, payload.clone());

        let parsed = Container::from_bytes(&container.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.payload, payload);
    }

    #[test]
    fn test_unrepresentable_symbols() {
        for text in ["a:b", "line\nbreak"] {
            let table = FrequencyTable::from_text(text);
            let err = serialize_container(&table, &[]).unwrap_err();
            assert!(err.is_unrepresentable(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse_container(b"a:1 b:2").unwrap_err();
        assert!(matches!(
            err,
            Error::Container(ContainerError::MissingDelimiter)
        ));
        assert!(err.is_corrupt_container());
    }

    #[test]
    fn test_colon_free_entry() {
        let err = parse_container(b"a:1 b2\n\x00").unwrap_err();
        assert!(matches!(
            err,
            Error::Container(ContainerError::MalformedEntry { .. })
        ));
        assert!(err.is_corrupt_container());
    }

    #[test]
    fn test_multiple_colons() {
        let err = parse_frequency_text("a:b:3").unwrap_err();
        assert!(err.is_corrupt_container());
    }

    #[test]
    fn test_multi_char_symbol() {
        let err = parse_frequency_text("ab:3").unwrap_err();
        assert!(matches!(
            err,
            Error::Container(ContainerError::MalformedEntry { .. })
        ));
    }

    #[test]
    fn test_invalid_counts() {
        for text in ["a:", "a:x", "a:-1", "a:+1", "a:0", "a:99999999999999999999999"] {
            let err = parse_frequency_text(text).unwrap_err();
            assert!(
                matches!(err, Error::Container(ContainerError::InvalidCount { .. })),
                "{text:?} should have an invalid count"
            );
        }
    }

    #[test]
    fn test_duplicate_symbol() {
        let err = parse_frequency_text("a:1 a:2").unwrap_err();
        assert!(matches!(
            err,
            Error::Container(ContainerError::DuplicateSymbol { symbol: 'a' })
        ));
    }

    #[test]
    fn test_double_space_is_malformed() {
        let err = parse_frequency_text("a:1  b:2").unwrap_err();
        assert!(err.is_corrupt_container());
    }

    #[test]
    fn test_count_overflow() {
        let err = parse_frequency_text("a:18446744073709551615 b:1").unwrap_err();
        assert!(matches!(err, Error::Container(ContainerError::CountOverflow)));
        assert!(err.is_corrupt_container());

        let table = parse_frequency_text("a:18446744073709551614 b:1").unwrap();
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_container(b"\xFF:1\n\x00").unwrap_err();
        assert!(matches!(err, Error::Container(ContainerError::InvalidUtf8)));
    }

    #[test]
    fn test_empty_table_text() {
        let container = parse_container(b"\n").unwrap();
        assert!(container.frequencies.is_empty());
        assert!(container.payload.is_empty());
    }
}
