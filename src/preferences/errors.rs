//! Preference errors

use thiserror::Error;

/// Result type for preference operations
pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Unknown theme name
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Preference file could not be read or written
    #[error("Preference storage failed: {0}")]
    Io(#[from] std::io::Error),

    /// Preference file holds invalid JSON
    #[error("Preference file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
