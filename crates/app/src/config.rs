//! Configuration for the huffpack application.
//!
//! Parses command-line arguments into a [`Config`] with the same defaults the
//! tool has always used: read `input.txt`, write `output.bin`, decode from
//! `output.bin`.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// Default text input for `encode`.
pub const DEFAULT_TEXT_FILE: &str = "input.txt";

/// Default container path (output of `encode`, input of `decode`).
pub const DEFAULT_CONTAINER_FILE: &str = "output.bin";

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Compress a text file into a container
    Encode,
    /// Restore the text stored in a container
    Decode,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "huffpack")]
#[command(about = "Huffman text compressor")]
#[command(after_help = "EXAMPLES:\n    \
    huffpack encode                              # input.txt -> output.bin\n    \
    huffpack encode --in notes.txt --out notes.hp --show-codes\n    \
    huffpack encode --sample 4096 --seed 42      # Compress generated text\n    \
    huffpack decode --in notes.hp --out notes.txt")]
pub struct Args {
    /// Operation to perform
    #[arg(value_enum)]
    pub action: Action,

    /// Input file (encode: text, default input.txt; decode: container, default output.bin)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file (encode: container, default output.bin; decode: text, default stdout)
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Encode generated sample text of this many bytes instead of reading a file
    #[arg(long, value_name = "BYTES", conflicts_with = "input")]
    pub sample: Option<usize>,

    /// Random seed for the sample text
    #[arg(long, value_name = "N", requires = "sample")]
    pub seed: Option<u64>,

    /// Print the Huffman tree
    #[arg(long)]
    pub show_tree: bool,

    /// Print the code table
    #[arg(long)]
    pub show_codes: bool,

    /// Print the original and encoded bit strings
    #[arg(long)]
    pub show_bits: bool,

    /// Decode the container in memory and compare checksums
    #[arg(long)]
    pub verify: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the compression summary
    #[arg(long)]
    pub no_metrics: bool,
}

/// Where encode reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    File(PathBuf),
    Sample { seed: u64, size_bytes: usize },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,

    // === Files ===
    /// Text source for encode
    pub text_source: TextSource,

    /// Container path (written by encode, read by decode)
    pub container_file: PathBuf,

    /// Decoded text destination (None = stdout)
    pub decoded_file: Option<PathBuf>,

    // === Reports ===
    pub show_tree: bool,
    pub show_codes: bool,
    pub show_bits: bool,

    // === Behavior ===
    pub verify: bool,
    pub print_config: bool,
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from the process arguments.
    pub fn from_env() -> Self {
        Self::from_parsed(Args::parse())
    }

    /// Parse configuration from an explicit argument list (first item is the program name).
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Args::try_parse_from(args).map(Self::from_parsed)
    }

    fn from_parsed(args: Args) -> Self {
        // Without --seed the sample differs per run; the seed is printed so it can be replayed.
        let text_source = match args.sample {
            Some(size_bytes) => TextSource::Sample {
                seed: args.seed.unwrap_or_else(time_seed),
                size_bytes,
            },
            None => TextSource::File(
                match args.action {
                    Action::Encode => args.input.clone(),
                    Action::Decode => None,
                }
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEXT_FILE)),
            ),
        };

        let (container_file, decoded_file) = match args.action {
            Action::Encode => (args.output, None),
            Action::Decode => (args.input, args.output),
        };

        Config {
            action: args.action,
            text_source,
            container_file: container_file.unwrap_or_else(|| PathBuf::from(DEFAULT_CONTAINER_FILE)),
            decoded_file,
            show_tree: args.show_tree,
            show_codes: args.show_codes,
            show_bits: args.show_bits,
            verify: args.verify,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Action: {:?}", self.action);
        match self.action {
            Action::Encode => {
                match &self.text_source {
                    TextSource::File(path) => println!("Input text:  {}", path.display()),
                    TextSource::Sample { seed, size_bytes } => {
                        println!("Input text:  (sample, {} bytes, seed {})", size_bytes, seed)
                    }
                }
                println!("Container:   {}", self.container_file.display());
            }
            Action::Decode => {
                println!("Container:   {}", self.container_file.display());
                println!(
                    "Output text: {}",
                    self.decoded_file.as_deref().map_or("(stdout)".into(), Path::to_string_lossy)
                );
            }
        }
        println!("Show tree: {}, codes: {}, bits: {}", self.show_tree, self.show_codes, self.show_bits);
        println!("Verify: {}", self.verify);
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
