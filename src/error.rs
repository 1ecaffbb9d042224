use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't open {0}")]
    CantOpen(String),
}
