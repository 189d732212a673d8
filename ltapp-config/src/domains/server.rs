//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{
    validate_path_prefix, validate_port_range, validate_positive, validate_required_string, Validatable,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix for all API routes (health checks are unprefixed)
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Enable permissive CORS for browser-based load tools
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_cors: bool,

    /// Attach an `X-Request-ID` to every request and response
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    /// Emit a tracing span per HTTP request
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// Upper bound on graceful shutdown
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_shutdown_timeout")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Resolve `bind_address:port` into a socket address
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| self.validation_error(format!("Invalid bind address '{}:{}': {}", self.bind_address, self.port, e)))
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;
        validate_path_prefix(&self.api_prefix, "api_prefix", self.domain_name())?;
        validate_positive(self.shutdown_timeout.as_secs(), "shutdown_timeout", self.domain_name())?;
        self.socket_addr()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}
