use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::errors::ServiceError;

/// Standard success response.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response.
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// `{ "success": true }` acknowledgement used by delete endpoints.
pub fn deleted_response() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

/// Validate request input.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::ValidationError(e.to_string()))
}
