//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Backend failures are split into transport, status and parse errors so
/// the front-end can tell them apart. None of them carry a fallback value.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}")]
    Http { status: u16, body: String },

    #[error("Could not parse backend response: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status code, when the backend answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
