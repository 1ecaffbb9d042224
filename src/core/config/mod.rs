use std::path::PathBuf;

mod paths;

pub use paths::{ConfigPaths, HISTORY_FILE_NAME};

use crate::flags::Flags;
use crate::input::history::DEFAULT_MAX_ENTRIES;

/// Settings fixed for the lifetime of one shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name diagnostics are attributed to, normally the shell's `argv[0]`.
    pub program: String,
    pub script: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_limit: usize,
}

impl Config {
    pub fn new(program: impl Into<String>) -> Self {
        Config {
            program: program.into(),
            script: None,
            history_file: None,
            history_limit: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Command line first, then the home directory default.
    pub fn from_flags(program: impl Into<String>, flags: &Flags) -> Self {
        let history_file = if flags.no_history {
            None
        } else {
            flags
                .history_file
                .clone()
                .or_else(|| ConfigPaths::from_home().map(|p| p.history_path))
        };

        Config {
            script: flags.script.clone(),
            history_file,
            ..Config::new(program)
        }
    }
}
