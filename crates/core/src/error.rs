//! Error types for huffpack.
//!
//! All operations return structured errors rather than panicking. Every
//! failure falls into one of three caller-visible kinds, exposed through the
//! `is_*` predicates on [`Error`]:
//! - empty input (nothing to build a tree from)
//! - unrepresentable symbol (collides with the container's delimiters)
//! - corrupt container (frequency text or payload cannot be decoded)

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: tree construction or encode/decode failures
/// - Container: frequency-table serialization/parsing
/// - I/O: file system operations (used by the command-line front end)
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., empty input, truncated payload)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container error (e.g., malformed frequency entry)
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the failure is an attempt to encode or rebuild a tree from nothing.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Error::Huffman(HuffmanError::EmptyInput))
    }

    /// True when a symbol cannot be written into the frequency table text.
    pub fn is_unrepresentable(&self) -> bool {
        matches!(
            self,
            Error::Container(ContainerError::UnrepresentableSymbol { .. })
        )
    }

    /// True when a container could not be parsed or its payload could not be decoded.
    pub fn is_corrupt_container(&self) -> bool {
        match self {
            Error::Container(err) => err.is_corrupt(),
            Error::Huffman(HuffmanError::InvalidCode { .. })
            | Error::Huffman(HuffmanError::TruncatedPayload { .. })
            | Error::Huffman(HuffmanError::WeightOverflow) => true,
            _ => false,
        }
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols to build a tree from (empty text or empty frequency table)
    #[error("empty input: cannot build a huffman tree without symbols")]
    EmptyInput,

    /// A bit sequence that does not lead to any leaf
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Payload ran out before every counted symbol was decoded
    #[error("payload truncated: expected {expected} symbols, decoded {decoded}")]
    TruncatedPayload { expected: u64, decoded: u64 },

    /// Merged weights no longer fit in a `u64`
    #[error("symbol counts overflow a 64-bit total")]
    WeightOverflow,

    /// A symbol of the text has no entry in the code table
    #[error("no code for symbol {symbol:?}")]
    MissingCode { symbol: char },
}

/// Container format errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Symbol collides with the `symbol:count` / space-separated scheme
    #[error("symbol {symbol:?} cannot be represented in the frequency table")]
    UnrepresentableSymbol { symbol: char },

    /// No newline separating the frequency text from the payload
    #[error("missing newline between frequency table and payload")]
    MissingDelimiter,

    /// Frequency text is not valid UTF-8
    #[error("frequency table is not valid UTF-8")]
    InvalidUtf8,

    /// Entry is not of the form `symbol:count`
    #[error("malformed frequency entry {entry:?}")]
    MalformedEntry { entry: String },

    /// Count is not a positive decimal integer
    #[error("invalid count in frequency entry {entry:?}")]
    InvalidCount { entry: String },

    /// Same symbol listed twice
    #[error("duplicate symbol {symbol:?} in frequency table")]
    DuplicateSymbol { symbol: char },

    /// Counts add up to more than a `u64` can hold
    #[error("frequency counts overflow a 64-bit total")]
    CountOverflow,

    /// Whole bytes left over after the last encoded symbol
    #[error("payload has {actual} bytes, expected {expected}")]
    TrailingPayload { expected: usize, actual: usize },
}

impl ContainerError {
    /// Every variant except `UnrepresentableSymbol` describes a damaged container.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, ContainerError::UnrepresentableSymbol { .. })
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
