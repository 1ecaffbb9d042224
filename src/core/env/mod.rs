mod vars;

pub use vars::Environment;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),

    #[error("Invalid value for {0}: contains a NUL byte")]
    InvalidValue(String),
}
