//! CLI parse: clap types for fileguard. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// fileguard - Directory integrity monitor
#[derive(Parser, Debug)]
#[command(name = "fileguard")]
#[command(about = "Record SHA-256 digests of a directory tree and report what changed since")]
#[command(version)]
pub struct Cli {
    /// Run mode: create | check (also 1 | 2)
    pub mode: String,

    /// Directory to snapshot or check
    pub directory: PathBuf,

    /// Baseline file (default: baseline.json in the working directory)
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Disable coloured text output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
