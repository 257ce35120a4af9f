//! Uniform JSON error and notice bodies.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Generic error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self {
            details: Some(serde_json::json!({ "field": field })),
            ..Self::new("VALIDATION_FAILED", message)
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("{} not found: {}", resource_type, id),
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Non-error outcome shown to the user as a banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeResponse {
    pub status: String,
    pub message: String,
}

impl NoticeResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: "warning".to_string(),
            message: message.into(),
        }
    }
}

/// 200 with a `warning` notice; used for duplicate submissions.
pub fn duplicate_warning(what: &str) -> Response {
    (
        StatusCode::OK,
        Json(NoticeResponse::warning(format!(
            "{} ya existe (posible doble clic)",
            what
        ))),
    )
        .into_response()
}

pub fn validation_failed(field: &str, message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::validation(field, message)),
    )
        .into_response()
}

pub fn not_found(resource_type: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found(resource_type, id)),
    )
        .into_response()
}

pub fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::forbidden("Permission denied")),
    )
        .into_response()
}

/// Logs the failure and answers with a generic 500.
pub fn internal_error(failure: impl fmt::Display) -> Response {
    error!(error = %failure, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Error interno")),
    )
        .into_response()
}
