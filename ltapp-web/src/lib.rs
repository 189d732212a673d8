//! # ltapp Web Utilities
//!
//! Reusable middleware and helpers for the ltapp HTTP API built with Axum:
//! the response envelope, error conversion, CORS and request IDs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn, routing::get, Router};
//! use ltapp_web::{cors_layer, request_id_middleware, ApiResponse};
//!
//! async fn ping() -> ApiResponse<&'static str> {
//!     ApiResponse::success("pong")
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/ping", get(ping))
//!     .layer(from_fn(request_id_middleware))
//!     .layer(cors_layer());
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod middleware;
pub mod utils;

// Re-export commonly used types and functions
pub use errors::{ErrorDetail, WebError, WebResult};
pub use middleware::{
    cors_layer, cors_layer_with_config, error_handler_middleware, handle_not_found,
    request_id_middleware, CorsConfig, RequestId, REQUEST_ID_HEADER,
};
pub use utils::{accepted, ok, ApiResponse};
