use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tf", about = concat!("[#] taskflow v", env!("CARGO_PKG_VERSION"), " - your board, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the task collection as JSON to a file or stdout
    Export(ExportArgs),
    /// Replace the task collection from a JSON file
    Import(ImportArgs),
    /// Show recent storage events
    Events(EventsArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding an array of task records
    pub file: PathBuf,
    /// Replace the current collection without asking
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct EventsArgs {
    /// Show at most N entries
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,
}
