//! huffpack: compress a text file with Huffman coding, or restore it.
//!
//! `encode` reads text (or generates a sample), writes a container and
//! optionally prints the tree, code table and bit strings. `decode` reads a
//! container and writes the restored text to a file or stdout.
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see pipeline details.

mod config;
mod input_gen;
mod report;

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use huffpack_core::codec::{self, Analysis};
use huffpack_core::metrics::CompressionStats;
use huffpack_core::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Action, Config, TextSource};

fn main() -> ExitCode {
    init_logging();

    let config = Config::from_env();
    if config.print_config {
        config.print();
    }

    let result = match config.action {
        Action::Encode => run_encode(&config),
        Action::Decode => run_decode(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "{:?} failed", config.action);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_text(source: &TextSource) -> Result<String> {
    match source {
        TextSource::File(path) => {
            info!(path = %path.display(), "reading input text");
            Ok(fs::read_to_string(path)?)
        }
        TextSource::Sample { seed, size_bytes } => {
            info!(seed, size_bytes, "generating sample text");
            Ok(input_gen::generate_sample_text(*seed, *size_bytes))
        }
    }
}

fn run_encode(config: &Config) -> Result<()> {
    let mut stats = CompressionStats::new();
    let text = load_text(&config.text_source)?;

    let analysis = Analysis::of(&text)?;
    stats.record_analysis(&text, &analysis);

    if config.show_tree {
        report::print_tree(&analysis.tree);
    }

    let container = analysis.encode(&text)?;
    stats.record_container(&container);
    fs::write(&config.container_file, &container)?;
    info!(
        path = %config.container_file.display(),
        bytes = container.len(),
        "wrote container"
    );

    if config.show_codes {
        report::print_codes(&analysis.codes);
    }
    if config.show_bits {
        report::print_bits(&text, &analysis.bits(&text)?);
    }

    if config.verify {
        verify_round_trip(&text, &container)?;
    }

    stats.complete();
    if config.print_metrics {
        stats.print_summary();
    }
    Ok(())
}

/// Decode the fresh container and compare CRC32 of the input and the result.
fn verify_round_trip(text: &str, container: &[u8]) -> Result<bool> {
    let decoded = codec::decode(container)?;
    let expected = crc32fast::hash(text.as_bytes());
    let actual = crc32fast::hash(decoded.as_bytes());

    let passed = expected == actual;
    if passed {
        println!("Verification: PASSED (crc32 {expected:#010x})");
    } else {
        warn!(expected, actual, "round trip mismatch");
        println!("Verification: FAILED (crc32 {expected:#010x} != {actual:#010x})");
    }
    Ok(passed)
}

fn run_decode(config: &Config) -> Result<()> {
    info!(path = %config.container_file.display(), "reading container");
    let container = fs::read(&config.container_file)?;
    let text = codec::decode(&container)?;

    match &config.decoded_file {
        Some(path) => {
            fs::write(path, &text)?;
            info!(path = %path.display(), bytes = text.len(), "wrote decoded text");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_round_trip() {
        let text = "verify me, verify me";
        let container = codec::encode(text).unwrap();
        assert!(verify_round_trip(text, &container).unwrap());
        assert!(!verify_round_trip("something else", &container).unwrap());
    }

    #[test]
    fn test_verify_rejects_corrupt_container() {
        assert!(verify_round_trip("abb", b"a:1 b:2").is_err());
    }
}
