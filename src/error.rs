use thiserror::Error;

use crate::literal::ParseError;
use crate::options::{OptionsError, ResolveError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Options error: {0}")]
    Options(#[from] OptionsError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }

    /// Stable code for options errors, `None` for everything else.
    pub fn error_code(&self) -> Option<String> {
        match self {
            Error::Options(e) => Some(e.error_code()),
            _ => None,
        }
    }
}
