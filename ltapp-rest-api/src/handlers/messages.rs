//! Message endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use ltapp_web::{accepted, ok};
use tracing::debug;

use crate::{
    context::MessagesContext,
    errors::{RestError, RestResult},
    models::{QueueCountResponse, SendMessageRequest},
};

/// Accept a payload for sending; 202 with the receipt
pub async fn send_message(
    State(ctx): State<MessagesContext>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> RestResult<Response> {
    let Json(request) = body.map_err(|rejection| RestError::validation_error(rejection.body_text(), None))?;
    let payload = request
        .payload
        .ok_or_else(|| RestError::validation_error("Message payload is required", Some("payload")))?;

    debug!(length = payload.chars().count(), "Sending message");
    let receipt = ctx.service.send(payload).await?;
    Ok(accepted(receipt))
}

/// Remove and return a random buffered message
pub async fn get_random_message(State(ctx): State<MessagesContext>) -> RestResult<Response> {
    debug!("Retrieving random message from queue");
    let message = ctx.service.retrieve()?;
    Ok(ok(message))
}

pub async fn get_queue_size(State(ctx): State<MessagesContext>) -> Response {
    ok(QueueCountResponse::internal(ctx.service.queue_size()))
}

pub async fn get_message_stats(State(ctx): State<MessagesContext>) -> Response {
    ok(ctx.service.stats())
}
