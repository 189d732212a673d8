//! Server startup and shutdown logic

use anyhow::Result;
use axum::{routing::get, Json, Router};
use ltapp_config::LtappConfig;
use ltapp_rest_api::{create_rest_app, AppConfig as RestAppConfig};
use std::future::Future;
use tokio::net::TcpListener;

use crate::services::ServiceContainer;

/// Server application struct
pub struct Server {
    config: LtappConfig,
    services: ServiceContainer,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: LtappConfig) -> Result<Self> {
        // Initialize logging first
        ltapp_logging::init_logging_from_config(&config.logging)?;

        let services = ServiceContainer::new(&config);

        Ok(Self { config, services })
    }

    pub fn services(&self) -> &ServiceContainer {
        &self.services
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let rest_config = RestAppConfig::from(&self.config.server);
        let api_prefix = rest_config.api_prefix.clone();

        create_rest_app(self.services.rest_context(), rest_config)
            .route("/", get(move || root_handler(api_prefix.clone())))
    }

    /// Bind the configured address and serve until SIGINT/SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `signal` resolves, then stop the services
    pub async fn serve<F>(mut self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_app();

        self.log_config_summary();
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        self.services
            .shutdown(self.config.server.shutdown_timeout)
            .await;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;
        let load = &self.config.load;
        let messaging = &self.config.messaging;

        tracing::info!("=== ltapp Server Configuration ===");
        tracing::info!("Bind Address: {}:{}", server.bind_address, server.port);
        tracing::info!("API Prefix: {}", server.api_prefix);
        tracing::info!("CORS: {}", enabled(server.enable_cors));
        tracing::info!("Request ID: {}", enabled(server.enable_request_id));
        tracing::info!("Tracing: {}", enabled(server.enable_tracing));
        tracing::info!(
            "CPU Threads: {} (max {})",
            load.cpu_threads,
            load.max_cpu_threads
        );
        tracing::info!(
            "Memory Growth: {} bytes every {} ms",
            load.memory_chunk_bytes,
            load.memory_interval_ms
        );
        tracing::info!(
            "Messaging: topic '{}' over {:?} transport",
            messaging.topic,
            messaging.transport.kind
        );
        tracing::info!("==================================");
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Root handler
async fn root_handler(api_prefix: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "ltapp load-testing target",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "rest_api": api_prefix,
            "health": "/health",
            "ready": "/ready",
            "live": "/live"
        }
    }))
}

/// Graceful shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
