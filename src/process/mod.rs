use std::ffi::CString;
use std::path::Path;

use thiserror::Error;

pub mod launcher;
pub mod resolver;

pub use launcher::ForkExec;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("fork failed: {0}")]
    Fork(std::io::Error),

    #[error("wait failed: {0}")]
    Wait(std::io::Error),

    #[error("argument contains a NUL byte: {0:?}")]
    NulByte(String),
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl ExitOutcome {
    /// Status as the shell records it; a signal `n` maps to `128 + n`.
    pub fn status(self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => code,
            ExitOutcome::Signaled(signal) => 128 + signal,
        }
    }
}

/// Creates a child running `path` and blocks until it terminates.
pub trait Launcher {
    fn launch(
        &mut self,
        path: &Path,
        argv: &[String],
        env: &[CString],
    ) -> Result<ExitOutcome, LaunchError>;
}
