//! REST API specific error types and conversions

use axum::response::{IntoResponse, Response};
use ltapp_messaging::MessagingError;
use ltapp_pressure::PressureError;
use ltapp_web::WebError;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<&'static str> },

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Messaging(#[from] MessagingError),

    #[error(transparent)]
    Pressure(#[from] PressureError),

    #[error(transparent)]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.into_web_error().into_response()
    }
}

impl RestError {
    /// Map onto the web layer's status codes and envelope
    pub fn into_web_error(self) -> WebError {
        match self {
            RestError::NotFound(msg) => WebError::not_found(msg),
            RestError::BadRequest(msg) => WebError::bad_request(msg),
            RestError::Validation { message, field } => WebError::validation(message, field),
            RestError::InternalError(msg) => WebError::internal(msg),
            RestError::Messaging(err) => match err {
                MessagingError::EmptyBuffer => WebError::not_found(err.to_string()),
                MessagingError::InvalidPayload(message) => WebError::validation(message, Some("payload")),
                MessagingError::InvalidParameter { field, message } => {
                    WebError::validation(format!("{} {}", field, message), Some(field))
                }
                MessagingError::TransportFailure(_) => WebError::internal(err.to_string()),
            },
            RestError::Pressure(err) => match err {
                PressureError::InvalidThreadCount { .. } => WebError::bad_request(err.to_string()),
                PressureError::SpawnFailed(_) => WebError::internal(err.to_string()),
            },
            RestError::Web(err) => err,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field: Option<&'static str>) -> Self {
        RestError::Validation {
            message: message.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use ltapp_messaging::TransportError;

    #[test]
    fn test_messaging_error_mapping() {
        let cases = [
            (MessagingError::EmptyBuffer, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND"),
            (
                MessagingError::InvalidPayload("Message payload is required".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                MessagingError::TransportFailure(TransportError::Closed),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let web = RestError::from(err).into_web_error();
            assert_eq!(web.status_code(), status);
            assert_eq!(web.error_code(), code);
        }
    }

    #[test]
    fn test_thread_count_is_bad_request() {
        let err = RestError::from(PressureError::InvalidThreadCount { requested: 0, max: 256 });
        assert_eq!(err.into_web_error().status_code(), StatusCode::BAD_REQUEST);
    }
}
