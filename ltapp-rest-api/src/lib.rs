//! # ltapp REST API
//!
//! HTTP endpoints for the ltapp load-testing target. The routes map one-to-one
//! onto the load controller and the message service; handlers hold no logic
//! beyond parameter extraction and the response envelope.
//!
//! ## Architecture
//!
//! Dependencies arrive through context structs ([`LoadContext`],
//! [`MessagesContext`]) bundled into [`AppContext`] router state, so tests can
//! build the router around freshly constructed services.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ltapp_config::LtappConfig;
//! use ltapp_messaging::{MessageBuffer, MessageService, SinkTransport};
//! use ltapp_pressure::LoadController;
//! use ltapp_rest_api::{create_rest_app, AppConfig, AppContext};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LtappConfig::default();
//! let controller = Arc::new(LoadController::new(&config.load));
//! let service = Arc::new(MessageService::new(
//!     Arc::new(MessageBuffer::new()),
//!     Arc::new(SinkTransport),
//!     config.messaging.clone(),
//! ));
//!
//! let app = create_rest_app(AppContext::new(controller, service), AppConfig::from(&config.server));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod process;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig};
pub use context::{AppContext, LoadContext, MessagesContext};
pub use errors::{RestError, RestResult};
pub use models::*;
pub use process::{ProcessMetrics, ProcessSampler};
