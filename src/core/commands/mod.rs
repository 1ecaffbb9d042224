use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

mod alias;
mod cd;
mod env;
mod exit;
mod help;
mod history;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use env::{EnvCommand, SetenvCommand, UnsetenvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::env::EnvError;
use crate::shell::Session;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Illegal number: {0}")]
    IllegalNumber(String),

    #[error("can't cd to {0}")]
    CantCd(String),

    #[error("{0} not found")]
    AliasNotFound(String),

    #[error("{0}")]
    Env(#[from] EnvError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Status recorded in the session when a builtin fails with this error.
    pub fn status(&self) -> i32 {
        match self {
            CommandError::IllegalNumber(_) | CommandError::CantCd(_) => 2,
            _ => 1,
        }
    }
}

/// What the session loop should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop the shell, exiting with the given code or the last status.
    Terminate(Option<i32>),
}

pub trait Command {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError>;
}

/// Result of looking a line up in the builtin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    NotFound,
    Continue,
    Failed,
    Terminate(Option<i32>),
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Env(EnvCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    Alias(AliasCommand),
    Setenv(SetenvCommand),
    Unsetenv(UnsetenvCommand),
    History(HistoryCommand),
}

impl Command for CommandType {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(session, args),
            CommandType::Env(cmd) => cmd.execute(session, args),
            CommandType::Exit(cmd) => cmd.execute(session, args),
            CommandType::Help(cmd) => cmd.execute(session, args),
            CommandType::Alias(cmd) => cmd.execute(session, args),
            CommandType::Setenv(cmd) => cmd.execute(session, args),
            CommandType::Unsetenv(cmd) => cmd.execute(session, args),
            CommandType::History(cmd) => cmd.execute(session, args),
        }
    }
}

/// The fixed table of commands the shell runs itself.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let commands = BTreeMap::from([
            ("cd", CommandType::Cd(CdCommand::new())),
            ("env", CommandType::Env(EnvCommand)),
            ("exit", CommandType::Exit(ExitCommand)),
            ("help", CommandType::Help(HelpCommand)),
            ("alias", CommandType::Alias(AliasCommand)),
            ("setenv", CommandType::Setenv(SetenvCommand)),
            ("unsetenv", CommandType::Unsetenv(UnsetenvCommand)),
            ("history", CommandType::History(HistoryCommand)),
        ]);
        Self { commands }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs the builtin named by the session's first word, if there is one.
    ///
    /// A run builtin counts as a processed line and its outcome becomes the
    /// session status; a terminating builtin leaves the status alone.
    pub fn dispatch(&self, session: &mut Session) -> Dispatch {
        let Some(cmd) = session
            .argv
            .first()
            .and_then(|name| self.commands.get(name.as_str()))
        else {
            return Dispatch::NotFound;
        };

        session.line_count += 1;
        let args = session.argv[1..].to_vec();
        let result = cmd.execute(session, &args);
        debug!(command = %session.argv[0], ?result, "builtin");

        match result {
            Ok(Flow::Continue) => {
                session.status = 0;
                Dispatch::Continue
            }
            Ok(Flow::Terminate(code)) => Dispatch::Terminate(code),
            Err(e) => {
                session.status = e.status();
                session.report(&e.to_string());
                Dispatch::Failed
            }
        }
    }
}
