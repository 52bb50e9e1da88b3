use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

/// Standard error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request").
    pub error: String,
    /// Human-readable error description.
    pub message: String,
    /// Additional error details when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred.
    pub timestamp: String,
}

/// Errors surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient stock. {0}")]
    InsufficientStock(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::ValidationError(_)
            | ServiceError::InvalidInput(_)
            | ServiceError::InsufficientStock(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) | ServiceError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed to clients.
    ///
    /// Store failures collapse to a generic message; the underlying I/O error
    /// goes to the logs, not over the wire.
    pub fn response_message(&self) -> String {
        match self {
            ServiceError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_by_error_class() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InsufficientStock("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InternalError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_do_not_leak_details_to_clients() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let err = ServiceError::Store(StoreError::Io(io));
        assert_eq!(err.response_message(), "Internal server error");
    }
}
