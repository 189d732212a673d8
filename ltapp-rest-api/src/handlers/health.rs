//! Health check endpoints

use axum::{extract::State, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::{
    context::AppContext,
    models::common::{HealthResponse, HealthStatus},
};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Readiness check endpoint
///
/// Reports not ready while a generator is draining its workers or inbound
/// delivery has stopped.
pub async fn readiness_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    let mut checks = HashMap::new();

    let load = ctx.load.controller.status();
    let generators_settled = load.cpu.state != ltapp_pressure::GeneratorState::Stopping
        && load.memory.state != ltapp_pressure::GeneratorState::Stopping;
    checks.insert(
        "load".to_string(),
        if generators_settled {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
    );
    checks.insert(
        "messaging".to_string(),
        if ctx.messages.delivery_healthy() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
    );

    let response = HealthResponse::healthy().with_checks(checks);
    let status = match response.status {
        HealthStatus::Healthy => axum::http::StatusCode::OK,
        HealthStatus::Unhealthy => axum::http::StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

/// Liveness check endpoint
pub async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now(),
    }))
}
