//! Load control endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use ltapp_web::ok;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::{
    context::LoadContext,
    errors::RestResult,
    handlers::query_params,
    models::{CpuLoadQuery, LoadOverview, LoadStatusResponse},
    process::ProcessMetrics,
};

/// Start CPU load with `?threads=N` workers, or the configured default
pub async fn start_cpu_load(
    State(ctx): State<LoadContext>,
    query: Result<Query<CpuLoadQuery>, QueryRejection>,
) -> RestResult<Response> {
    let query = query_params(query)?;
    let status = ctx.controller.enable_cpu(query.threads).await?;
    info!(threads = ?query.threads, "CPU load enabled via API");
    Ok(ok(LoadStatusResponse::new(status)))
}

pub async fn stop_cpu_load(State(ctx): State<LoadContext>) -> Response {
    let status = ctx.controller.disable_cpu().await;
    info!("CPU load disabled via API");
    ok(LoadStatusResponse::new(status))
}

pub async fn start_memory_leak(State(ctx): State<LoadContext>) -> Response {
    let status = ctx.controller.enable_memory().await;
    info!("Memory leak enabled via API");
    ok(LoadStatusResponse::new(status))
}

pub async fn stop_memory_leak(State(ctx): State<LoadContext>) -> Response {
    let status = ctx.controller.disable_memory().await;
    info!("Memory leak disabled via API");
    ok(LoadStatusResponse::new(status))
}

/// Generator state and process resource usage
pub async fn load_status(State(ctx): State<LoadContext>) -> Response {
    let sampler = ctx.sampler.clone();
    let process = sampled_or_default(tokio::task::spawn_blocking(move || sampler.sample()).await);

    ok(LoadOverview {
        generators: ctx.controller.status(),
        process,
    })
}

fn sampled_or_default(sample: Result<ProcessMetrics, JoinError>) -> ProcessMetrics {
    sample.unwrap_or_else(|e| {
        warn!("Process metrics sample failed: {}", e);
        ProcessMetrics::default()
    })
}
