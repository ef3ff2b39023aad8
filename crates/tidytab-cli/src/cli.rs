//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tidytab: deterministic cleaning for messy tabular data
#[derive(Parser)]
#[command(name = "tidytab")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a data file and write the cleaned copy
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for cleaned data (default: <file>_cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the cleaning report as JSON to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Input delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Print the cleaning report as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Clean and report without writing any files
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the upload server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Directory where cleaned uploads are stored
        #[arg(long, default_value = "outputs")]
        output_dir: PathBuf,

        /// Largest accepted upload, in MiB
        #[arg(
            long = "max-upload-mb",
            value_name = "MIB",
            default_value = "25",
            value_parser = parse_upload_limit
        )]
        max_upload_bytes: usize,

        /// Open the upload page in a browser
        #[arg(long)]
        open: bool,
    },
}

/// Accept a single ASCII character, or `\t` / `tab` for tab.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter: {}. Use a single ASCII character or 'tab'.",
            s
        )),
    }
}

/// Parse a size in MiB into a byte count that fits in `usize`.
fn parse_upload_limit(s: &str) -> Result<usize, String> {
    let mib: usize = s
        .parse()
        .map_err(|_| format!("Invalid upload limit: {}. Use a whole number of MiB.", s))?;
    mib.checked_mul(1024 * 1024)
        .ok_or_else(|| format!("Upload limit too large: {} MiB", s))
}
