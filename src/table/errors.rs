//! # Table Errors
//!
//! Failures raised by a table collaborator.

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table collaborator errors
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Request could not be sent or the response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote service rejected the request
    #[error("Sheets API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Credentials could not be loaded or exchanged for a token
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Credentials only allow reads
    #[error("Credentials do not permit {0}")]
    ReadOnly(&'static str),

    /// Range could not be parsed or addresses no rows
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Table is temporarily unusable
    #[error("Table unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for TableError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TableError::Decode(err.to_string())
        } else {
            TableError::Transport(err.to_string())
        }
    }
}
