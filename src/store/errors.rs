//! # Record Store Errors
//!
//! Validation and not-found errors are raised before or instead of any
//! write. The remaining variants wrap a failed table call and are grouped
//! as external-call errors.

use thiserror::Error;

use crate::table::TableError;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    // ==================
    // Request Errors
    // ==================
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// No row carries the requested id
    #[error("Customer not found: {0}")]
    NotFound(String),

    // ==================
    // External Call Errors
    // ==================
    /// Reading the table failed
    #[error("Failed to fetch sheet data: {0}")]
    Fetch(#[source] TableError),

    /// Appending a row failed
    #[error("Failed to add customer: {0}")]
    Append(#[source] TableError),

    /// Overwriting a row failed
    #[error("Failed to update customer: {0}")]
    Update(#[source] TableError),

    /// Removing a row failed
    #[error("Failed to delete customer: {0}")]
    Delete(#[source] TableError),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    /// Whether the error came from the table collaborator
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            StoreError::Fetch(_)
                | StoreError::Append(_)
                | StoreError::Update(_)
                | StoreError::Delete(_)
        )
    }

    /// Message safe to return to a client; external causes are left out
    pub fn public_message(&self) -> String {
        match self {
            StoreError::Validation(msg) => msg.clone(),
            StoreError::NotFound(_) => "Customer not found".to_string(),
            StoreError::Fetch(_) => "Failed to fetch sheet data".to_string(),
            StoreError::Append(_) => "Failed to add customer".to_string(),
            StoreError::Update(_) => "Failed to update customer".to_string(),
            StoreError::Delete(_) => "Failed to delete customer".to_string(),
        }
    }
}
