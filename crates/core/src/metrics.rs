//! Compression statistics for one encode run.
//!
//! Tracks sizes at each stage so a caller can report how well a text
//! compressed: symbols in, code bits produced, payload and container bytes
//! out, and how long it took.

use std::time::{Duration, Instant};

use crate::codec::Analysis;

#[derive(Debug, Clone)]
pub struct CompressionStats {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// UTF-8 size of the source text
    pub input_bytes: u64,

    /// Number of symbols (chars) in the source text
    pub symbols: u64,

    /// Number of distinct symbols
    pub distinct_symbols: u64,

    // === Output ===
    /// Code bits before padding
    pub encoded_bits: u64,

    /// Packed payload size
    pub payload_bytes: u64,

    /// Whole container size (frequency text + delimiter + payload)
    pub container_bytes: u64,

    /// Longest code in the table
    pub max_code_len: u64,
}

impl CompressionStats {
    /// Start a new run with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            symbols: 0,
            distinct_symbols: 0,
            encoded_bits: 0,
            payload_bytes: 0,
            container_bytes: 0,
            max_code_len: 0,
        }
    }

    /// Record what the analysis of `text` produced.
    pub fn record_analysis(&mut self, text: &str, analysis: &Analysis) {
        self.input_bytes = text.len() as u64;
        self.symbols = analysis.frequencies.total();
        self.distinct_symbols = analysis.frequencies.len() as u64;
        self.encoded_bits = analysis.encoded_bits();
        self.payload_bytes = self.encoded_bits.div_ceil(8);
        self.max_code_len = analysis.codes.max_len() as u64;
    }

    pub fn record_container(&mut self, container: &[u8]) {
        self.container_bytes = container.len() as u64;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Zero bits appended to fill the last payload byte.
    pub fn padding_bits(&self) -> u64 {
        self.payload_bytes * 8 - self.encoded_bits
    }

    /// Payload bytes / input bytes. Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length. Returns 0.0 for empty input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Original size: {} bytes ({} symbols, {} distinct)", self.input_bytes, self.symbols, self.distinct_symbols);
        println!("Encoded size:  {} bytes ({} bits + {} padding)", self.payload_bytes, self.encoded_bits, self.padding_bits());
        println!("Container:     {} bytes", self.container_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits per symbol: {:.3} (longest code {})", self.bits_per_symbol(), self.max_code_len);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             symbols={}\n\
             distinct_symbols={}\n\
             encoded_bits={}\n\
             payload_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.symbols,
            self.distinct_symbols,
            self.encoded_bits,
            self.payload_bytes,
            self.container_bytes,
            self.compression_ratio(),
            self.bits_per_symbol(),
        )
    }
}

impl Default for CompressionStats {
    fn default() -> Self {
        Self::new()
    }
}
