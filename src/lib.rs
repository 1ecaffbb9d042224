pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod input;
pub mod path;
pub mod process;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::env::Environment;
use crate::error::ShellError;
use crate::input::{EditorInput, History, LineSource, ReaderInput};
use crate::process::ForkExec;
use crate::shell::{Session, Shell, STATUS_NOT_FOUND};

/// Runs a whole shell session and returns the process exit code.
pub fn run(config: Config) -> i32 {
    let env = Environment::from_process();
    let history = load_history(&config);

    if let Some(script) = &config.script {
        let file = match File::open(script) {
            Ok(file) => file,
            Err(e) => {
                debug!(script = %script.display(), "open failed: {}", e);
                let err = ShellError::CantOpen(script.display().to_string());
                eprintln!("{}: 0: {}", config.program, err);
                return STATUS_NOT_FOUND;
            }
        };
        let session = Session::new(config.program, false, env).with_history(history);
        let input = ReaderInput::new(BufReader::new(file));
        return Shell::new(session, input, ForkExec::new()).run();
    }

    let interactive = io::stdin().is_terminal();
    let input: Box<dyn LineSource> = if interactive {
        match EditorInput::new() {
            Ok(editor) => Box::new(editor.with_history(history.entries())),
            Err(e) => {
                warn!("line editor unavailable: {}", e);
                Box::new(ReaderInput::new(io::stdin().lock()))
            }
        }
    } else {
        Box::new(ReaderInput::new(io::stdin().lock()))
    };

    let session = Session::new(config.program, interactive, env).with_history(history);
    Shell::new(session, input, ForkExec::new()).run()
}

fn load_history(config: &Config) -> History {
    let Some(path) = &config.history_file else {
        return History::detached(config.history_limit);
    };
    History::new(path.clone(), config.history_limit).unwrap_or_else(|e| {
        warn!("Couldn't load history: {}", e);
        History::detached(config.history_limit)
    })
}
