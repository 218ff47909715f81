//! Bit packing and unpacking for Huffman payloads.
//!
//! `BitWriter` turns a stream of code bits into bytes and `BitReader` walks
//! them back one bit at a time. Both operate MSB-first: the first bit of the
//! stream is the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data; the decoder stops by symbol
//!   count, never by running out of bits
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{pack, unpack, BitReader};
//!
//! let bytes = pack([false, true, true]);
//! assert_eq!(bytes, vec![0b0110_0000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(!reader.read_bit().unwrap());
//! assert_eq!(unpack(&bytes).len(), 8);
//! ```

use crate::codes::Code;
use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_buffer` contains up to 7 bits (never a full byte)
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose output buffer can hold `bits` bits without reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit of a Huffman code.
    pub fn write_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the output bytes.
    ///
    /// Remaining bits are padded with trailing zeros to complete the final byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every byte has been consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Number of bytes touched so far, counting a partially read byte.
    pub fn bytes_consumed(&self) -> usize {
        self.bit_position.div_ceil(8)
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}

/// Pack a bit sequence into bytes, zero-padding the final byte on the right.
///
/// No bit count is recorded; `pack(bits).len() == ceil(bits / 8)`.
pub fn pack<I>(bits: I) -> Vec<u8>
where
    I: IntoIterator<Item = bool>,
{
    let mut writer = BitWriter::new();
    for bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand bytes into exactly `8 * bytes.len()` bits, MSB first.
///
/// Trailing pad bits are returned as ordinary zeros.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// Render bits as a `'0'`/`'1'` string.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
