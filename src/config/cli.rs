//! Command-line argument definitions for testshell.

use camino::Utf8PathBuf;
use clap::Parser;

/// Command-line interface for testshell.
#[derive(Debug, Default, Parser)]
#[command(name = "testshell")]
#[command(
    author,
    version,
    about = "Interactive shell for building unit tests from expressions"
)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Directory exported test files are written to.
    #[arg(long)]
    pub export_dir: Option<Utf8PathBuf>,

    /// Prompt shown before each input line.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Run commands from a file instead of standard input.
    #[arg(long)]
    pub script: Option<Utf8PathBuf>,
}
