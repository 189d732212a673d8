//! Main application configuration and router setup

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use ltapp_config::ServerConfig;
use ltapp_web::{cors_layer, error_handler_middleware, handle_not_found, request_id_middleware};
use tower_http::trace::TraceLayer;

use crate::handlers;

use crate::context::AppContext;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
        }
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            enable_cors: server.enable_cors,
            enable_request_id: server.enable_request_id,
            enable_tracing: server.enable_tracing,
            api_prefix: server.api_prefix.clone(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let app = Router::new()
        // Health endpoints (no prefix)
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check))
        // API routes with prefix
        .nest(&config.api_prefix, create_api_router())
        .fallback(handle_not_found)
        .with_state(context);

    // Add middleware layers (applied in reverse order)
    let mut app = app.layer(from_fn(error_handler_middleware));

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.enable_request_id {
        app = app.layer(from_fn(request_id_middleware));
    }

    if config.enable_cors {
        app = app.layer(cors_layer());
    }

    app
}

/// Create unified API router
fn create_api_router() -> Router<AppContext> {
    Router::new()
        // Load control
        .route("/startCPULoad", get(handlers::start_cpu_load))
        .route("/stopCPULoad", get(handlers::stop_cpu_load))
        .route("/startLeak", get(handlers::start_memory_leak))
        .route("/stopLeak", get(handlers::stop_memory_leak))
        .route("/load/status", get(handlers::load_status))
        // Messages
        .route("/messages", post(handlers::send_message))
        .route("/getMessage", get(handlers::get_random_message))
        .route("/messages/random", get(handlers::get_random_message))
        .route("/messages/count", get(handlers::get_queue_size))
        .route("/messages/stats", get(handlers::get_message_stats))
        // Datapools
        .route(
            "/admin/datapools/messages",
            get(handlers::get_messages_for_datapool).post(handlers::generate_messages),
        )
}
