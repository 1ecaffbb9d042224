use std::io::Write;

use tracing::{debug, warn};

mod environment;
mod executor;
pub mod session;

pub use executor::STATUS_NOT_FOUND;
pub use session::Session;

use crate::{
    core::commands::{Builtins, Dispatch},
    input::{tokenizer, LineSource},
    process::{ForkExec, Launcher},
};

pub const PROMPT: &str = "$ ";

/// What one iteration of the loop asks for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Terminate,
    EndOfInput,
}

pub struct Shell<I, L = ForkExec> {
    session: Session,
    input: I,
    launcher: L,
    builtins: Builtins,
}

impl<I: LineSource, L: Launcher> Shell<I, L> {
    pub fn new(session: Session, input: I, launcher: L) -> Self {
        Shell {
            session,
            input,
            launcher,
            builtins: Builtins::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads and runs lines until end of input or `exit`, then returns the
    /// code the process should exit with.
    pub fn run(&mut self) -> i32 {
        while self.step() == LoopSignal::Continue {}
        self.finish()
    }

    /// Reads and runs a single line.
    pub fn step(&mut self) -> LoopSignal {
        self.session.reset();
        let interactive = self.session.is_interactive();

        if interactive && !self.input.shows_prompt() {
            if let Err(e) = write!(self.session.out(), "{}", PROMPT) {
                warn!("Couldn't write prompt: {}", e);
            }
            self.session.flush();
        }

        let prompt = if interactive { PROMPT } else { "" };
        let line = match self.input.read_line(prompt) {
            Ok(Some(line)) => line,
            Ok(None) => return self.end_of_input(),
            Err(e) => {
                warn!("read failed: {}", e);
                return self.end_of_input();
            }
        };
        debug!(%line, "read");

        self.session.history.add(&line);
        let words = self.session.aliases.expand(tokenizer::tokenize(&line));
        self.session.argv = environment::expand_vars(words, &self.session);
        self.session.raw_line = line;

        match self.builtins.dispatch(&mut self.session) {
            Dispatch::NotFound => {
                executor::route(&mut self.session, &mut self.launcher);
                LoopSignal::Continue
            }
            Dispatch::Terminate(code) => {
                self.session.terminate_requested = true;
                self.session.exit_code = code;
                LoopSignal::Terminate
            }
            Dispatch::Continue | Dispatch::Failed => LoopSignal::Continue,
        }
    }

    fn end_of_input(&mut self) -> LoopSignal {
        if self.session.is_interactive() {
            if let Err(e) = writeln!(self.session.out()) {
                warn!("Couldn't write newline: {}", e);
            }
        }
        LoopSignal::EndOfInput
    }

    fn finish(&mut self) -> i32 {
        if let Err(e) = self.session.history.persist() {
            warn!("Couldn't save history: {}", e);
        }
        self.session.reset();
        self.session.flush();

        let code = self.exit_code();
        debug!(code, status = self.session.status, "shell finished");
        code
    }

    /// Code for the shell process.
    ///
    /// After `exit`, its argument wins, else the last status. At end of input
    /// a non-interactive shell reports a failing last status; otherwise 0.
    pub fn exit_code(&self) -> i32 {
        let session = &self.session;
        let code = if session.terminate_requested {
            session.exit_code.unwrap_or(session.status)
        } else if !session.is_interactive() && session.status != 0 {
            session.status
        } else {
            0
        };
        code & 0xff
    }
}
