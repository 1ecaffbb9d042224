use std::path::PathBuf;

use clap::Parser;

/// hsh - a simple command interpreter
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "hsh", version, about)]
pub struct Flags {
    /// Read commands from FILE instead of standard input
    #[arg(value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// History file location
    #[arg(long, value_name = "PATH", env = "HSH_HISTFILE")]
    pub history_file: Option<PathBuf>,

    /// Neither load nor save command history
    #[arg(long)]
    pub no_history: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub debug: bool,
}
