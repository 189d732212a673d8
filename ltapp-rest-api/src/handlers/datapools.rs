//! Datapool endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use ltapp_web::ok;
use tracing::debug;

use crate::{
    context::MessagesContext,
    errors::{RestError, RestResult},
    handlers::query_params,
    models::{GenerateMessagesQuery, PeekMessagesQuery},
};

/// Send `count` messages generated from `pattern`
pub async fn generate_messages(
    State(ctx): State<MessagesContext>,
    query: Result<Query<GenerateMessagesQuery>, QueryRejection>,
) -> RestResult<Response> {
    let query = query_params(query)?;
    let count = query
        .count
        .ok_or_else(|| RestError::validation_error("count is required", Some("count")))?;

    let report = ctx.service.generate(count, query.pattern.as_deref()).await?;
    Ok(ok(report))
}

/// Previews of buffered messages for building external datapools
pub async fn get_messages_for_datapool(
    State(ctx): State<MessagesContext>,
    query: Result<Query<PeekMessagesQuery>, QueryRejection>,
) -> RestResult<Response> {
    let query = query_params(query)?;
    debug!(limit = ?query.limit, "Getting messages for datapool");
    let previews = ctx.service.peek(query.limit)?;
    Ok(ok(previews))
}
