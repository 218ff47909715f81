//! Sample text generation.
//!
//! When `--sample` is given, we generate text with interesting compression
//! characteristics instead of reading a file: a mix of skewed and flat
//! symbol distributions.
//!
//! # Design
//!
//! Generated text has:
//! - Some highly compressible sections (runs of the same letter)
//! - Some English-like sections (words over a small alphabet)
//! - Some repeating phrases
//! - Some nearly flat sections (printable ASCII and a few non-ASCII letters)
//!
//! The output never contains `:` or a newline, so it can always be encoded.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "the", "of", "and", "to", "in", "is", "huffman", "tree", "code", "bit", "symbol", "leaf",
    "node", "weight", "merge", "prefix", "table", "text",
];

const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';'];

const EXTENDED: &[char] = &['é', 'ü', 'ñ', 'ß', 'λ', 'ж'];

/// Generate sample text of exactly `size_bytes` UTF-8 bytes.
pub fn generate_sample_text(seed: u64, size_bytes: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(size_bytes + 4);

    while text.len() < size_bytes {
        let section_len = (size_bytes - text.len()).min(1024);

        match rng.gen_range(0..10) {
            // 20% runs of one letter
            0..=1 => {
                let letter = char::from(rng.gen_range(b'a'..=b'z'));
                text.extend(std::iter::repeat(letter).take(section_len));
            }

            // 40% word salad
            2..=5 => {
                let start = text.len();
                while text.len() - start < section_len {
                    text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
                    if rng.gen_bool(0.1) {
                        text.push(PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())]);
                    }
                    text.push(' ');
                }
            }

            // 20% repeating phrase
            6..=7 => {
                let phrase = generate_phrase(&mut rng);
                text.extend(phrase.chars().cycle().take(section_len));
            }

            // 20% nearly flat distribution
            _ => {
                for _ in 0..section_len {
                    text.push(random_symbol(&mut rng));
                }
            }
        }
    }

    truncate_to_boundary(&mut text, size_bytes);
    text
}

/// A short phrase of random words.
fn generate_phrase(rng: &mut ChaCha8Rng) -> String {
    let word_count = rng.gen_range(2..=6);
    let words: Vec<&str> = (0..word_count)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect();
    format!("{} ", words.join(" "))
}

/// Printable ASCII except `:`, occasionally a non-ASCII letter.
fn random_symbol(rng: &mut ChaCha8Rng) -> char {
    if rng.gen_bool(0.05) {
        return EXTENDED[rng.gen_range(0..EXTENDED.len())];
    }
    loop {
        let symbol = char::from(rng.gen_range(b' '..=b'~'));
        if symbol != ':' {
            return symbol;
        }
    }
}

/// Cut to `size_bytes`, then pad with spaces if a multi-byte char had to go.
fn truncate_to_boundary(text: &mut String, size_bytes: usize) {
    let mut end = size_bytes.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    while text.len() < size_bytes {
        text.push(' ');
    }
}
