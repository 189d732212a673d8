use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::WebError;

/// Logs every server error response leaving the router
pub async fn error_handler_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    if response.status().is_server_error() {
        error!(%method, %uri, "Server error occurred: {}", response.status());
    }

    response
}

/// Router fallback for unknown paths
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("The requested resource was not found")
}

/// Convenience function to convert any error to WebError
pub fn internal_error<E: std::fmt::Display>(err: E) -> WebError {
    WebError::internal(err.to_string())
}
