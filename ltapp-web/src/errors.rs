//! Web-specific error types and conversions
//!
//! Every error renders as the standard envelope with `success: false` and a
//! single entry in `errors`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::utils::ApiResponse;

/// Message returned in place of internal error details
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

/// Error entry of the response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } | WebError::Validation { .. } => StatusCode::BAD_REQUEST,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "ILLEGAL_ARGUMENT",
            WebError::Validation { .. } => "VALIDATION_ERROR",
            WebError::NotFound { .. } => "ENTITY_NOT_FOUND",
            WebError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            WebError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Envelope entry for this error; internal details are not exposed
    pub fn detail(&self) -> ErrorDetail {
        let (message, field) = match self {
            WebError::BadRequest { message }
            | WebError::NotFound { message }
            | WebError::ServiceUnavailable { message } => (message.clone(), None),
            WebError::Validation { message, field } => (message.clone(), field.clone()),
            WebError::MethodNotAllowed => (self.to_string(), None),
            WebError::Internal { .. } => (INTERNAL_ERROR_MESSAGE.to_string(), None),
        };

        ErrorDetail {
            code: self.error_code().to_string(),
            message,
            field,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if let WebError::Internal { message } = &self {
            error!("Unexpected error occurred: {}", message);
        }

        let status = self.status_code();
        let body = ApiResponse::<()>::failure(vec![self.detail()]);
        (status, body).into_response()
    }
}

// Common error constructors
impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        WebError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_codes() {
        let cases = [
            (WebError::bad_request("x"), StatusCode::BAD_REQUEST, "ILLEGAL_ARGUMENT"),
            (WebError::validation("x", Some("payload")), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (WebError::not_found("x"), StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND"),
            (WebError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.error_code(), code);
        }
    }

    #[test]
    fn test_internal_detail_is_sanitized() {
        let detail = WebError::internal("broker at 10.0.0.3 refused connection").detail();
        assert_eq!(detail.message, INTERNAL_ERROR_MESSAGE);
        assert!(detail.field.is_none());
    }

    #[test]
    fn test_validation_detail_keeps_field() {
        let detail = WebError::validation("Message payload is required", Some("payload")).detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("payload"));
    }
}
