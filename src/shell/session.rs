use std::io::{self, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::core::aliases::AliasManager;
use crate::core::env::Environment;
use crate::input::History;

/// Everything one shell instance knows, threaded through every component.
///
/// The per-command fields (`argv`, `command_path`, `raw_line`) are cleared by
/// [`Session::reset`] before each line is read.
pub struct Session {
    pub argv: Vec<String>,
    /// Exact file the router decided to execute for the current line.
    pub command_path: Option<PathBuf>,
    pub raw_line: String,
    /// Commands processed so far; diagnostics are attributed to it.
    pub line_count: usize,
    /// Outcome of the most recent builtin or child process.
    pub status: i32,
    pub terminate_requested: bool,
    /// Code given to the terminating builtin, if any.
    pub exit_code: Option<i32>,
    pub env: Environment,
    pub aliases: AliasManager,
    pub history: History,
    program: String,
    interactive: bool,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Session {
    pub fn new(program: impl Into<String>, interactive: bool, env: Environment) -> Self {
        Self {
            argv: Vec::new(),
            command_path: None,
            raw_line: String::new(),
            line_count: 0,
            status: 0,
            terminate_requested: false,
            exit_code: None,
            env,
            aliases: AliasManager::new(),
            history: History::default(),
            program: program.into(),
            interactive,
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn reset(&mut self) {
        self.argv.clear();
        self.command_path = None;
        self.raw_line.clear();
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }

    /// Writes `PROGRAM: LINE: COMMAND: message` to the error stream.
    pub fn report(&mut self, message: &str) {
        let command = self.argv.first().map(String::as_str).unwrap_or_default();
        let result = writeln!(
            self.err,
            "{}: {}: {}: {}",
            self.program, self.line_count, command, message
        );
        if let Err(e) = result {
            warn!("Couldn't write diagnostic: {}", e);
        }
    }

    /// Pushes buffered output out before a child writes to the same streams.
    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush().and_then(|_| self.err.flush()) {
            warn!("Couldn't flush output: {}", e);
        }
    }
}
