use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ErrorDetail;

/// Standard API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Failed response with the given error entries
    pub fn failure(errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Helper functions for common response patterns

/// 200 with the envelope around `data`
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, ApiResponse::success(data)).into_response()
}

/// 202 with the envelope around `data`
pub fn accepted<T: Serialize>(data: T) -> Response {
    (StatusCode::ACCEPTED, ApiResponse::success(data)).into_response()
}
