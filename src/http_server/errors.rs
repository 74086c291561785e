//! # HTTP Errors
//!
//! Maps store and preference failures to status codes and `{"error": ...}`
//! bodies. Causes of server errors are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::preferences::PreferenceError;
use crate::store::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// Request body or query string could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Preference(PreferenceError::UnknownTheme(_)) => StatusCode::BAD_REQUEST,
            ApiError::Preference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message returned to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Store(err) => err.public_message(),
            ApiError::Preference(PreferenceError::UnknownTheme(_)) => self.to_string(),
            ApiError::Preference(_) => "Failed to save preferences".to_string(),
            ApiError::InvalidRequest(_) => self.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(StoreError::validation("Missing required fields: name")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::NotFound("3".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Fetch(TableError::Transport("x".to_string())))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidRequest("bad json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_external_cause_not_exposed() {
        let err = ApiError::from(StoreError::Update(TableError::Auth(
            "private key rejected".to_string(),
        )));
        assert_eq!(err.public_message(), "Failed to update customer");
    }

    #[test]
    fn test_validation_message_exposed() {
        let err = ApiError::from(StoreError::validation("Missing required fields: email"));
        assert_eq!(err.public_message(), "Missing required fields: email");
    }
}
