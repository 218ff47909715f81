//! huffpack-core: lossless text compression with classical Huffman coding
//!
//! This library turns a text into a compact container and back:
//! - Counts symbol frequencies
//! - Builds a Huffman tree with deterministic tie-breaking
//! - Derives prefix-free codes from the tree
//! - Packs code bits into bytes, MSB-first with zero padding
//! - Stores the frequency table and payload in a small container
//!
//! # Architecture
//!
//! - `frequency`: Symbol counting
//! - `tree`: Huffman tree construction
//! - `codes`: Code table generation
//! - `bitio`: Bit packing and unpacking
//! - `container`: Container serialization/parsing
//! - `codec`: `encode` / `decode` entry points
//! - `metrics`: Compression statistics
//!
//! # Example
//!
//! ```
//! let container = huffpack_core::encode("abracadabra").unwrap();
//! assert_eq!(huffpack_core::decode(&container).unwrap(), "abracadabra");
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod container;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use codec::{decode, encode, Analysis};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
