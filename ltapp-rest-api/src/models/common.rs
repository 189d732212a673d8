//! Common types for REST API requests and responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API response wrapper
pub use ltapp_web::ApiResponse;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HashMap<String, HealthStatus>>,
}

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: None,
        }
    }

    pub fn with_checks(mut self, checks: HashMap<String, HealthStatus>) -> Self {
        self.status = if checks.values().any(|status| *status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };
        self.checks = Some(checks);
        self
    }
}
