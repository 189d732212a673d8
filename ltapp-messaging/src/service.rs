//! Message service
//!
//! Validation and bookkeeping around the buffer: sends are validated,
//! published and only then counted; inbound deliveries go straight into the
//! buffer.

use crate::buffer::MessageBuffer;
use crate::errors::{MessagingError, MessagingResult};
use crate::payload::MessagePayload;
use crate::transport::MessageTransport;
use chrono::{DateTime, Utc};
use ltapp_config::MessagingConfig;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Payload pattern used by [`MessageService::generate`] when none is given
pub const DEFAULT_MESSAGE_PATTERN: &str = "test_message_{index}_{random}";

/// Exclusive upper bound of the `{random}` placeholder
const PATTERN_RANDOM_BOUND: u32 = 10_000;

/// Sample ids reported per datapool generation
const SAMPLE_ID_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Enqueued,
    Retrieved,
}

/// Message returned from a send or a retrieve
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceipt {
    pub message_id: String,
    pub payload: MessagePayload,
    pub payload_length: usize,
    pub status: MessageStatus,
    pub topic: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePreview {
    pub id: String,
    pub payload_preview: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub total_sent: u64,
    pub total_consumed: u64,
    pub current_queue_size: usize,
    pub last_message_timestamp: Option<DateTime<Utc>>,
}

/// Outcome of a datapool generation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatapoolReport {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub requested_count: usize,
    pub created_count: usize,
    pub name_prefix: String,
    pub sample_ids: Vec<usize>,
}

pub struct MessageService {
    buffer: Arc<MessageBuffer>,
    transport: Arc<dyn MessageTransport>,
    config: MessagingConfig,
}

impl MessageService {
    pub fn new(
        buffer: Arc<MessageBuffer>,
        transport: Arc<dyn MessageTransport>,
        config: MessagingConfig,
    ) -> Self {
        Self {
            buffer,
            transport,
            config,
        }
    }

    pub fn buffer(&self) -> &Arc<MessageBuffer> {
        &self.buffer
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    /// Validate and publish a payload, counting it as produced on success
    pub async fn send(&self, payload: impl Into<String>) -> MessagingResult<MessageReceipt> {
        let payload = MessagePayload::from(payload.into());
        let payload_length = self.validate_payload(&payload)?;
        let message_id = Uuid::new_v4().to_string();

        if let Err(e) = self
            .transport
            .publish(&self.config.topic, payload.clone())
            .await
        {
            error!(
                transport = self.transport.name(),
                "Failed to publish message: {}", e
            );
            return Err(MessagingError::TransportFailure(e));
        }

        self.buffer.record_produced();
        info!(
            message_id = %message_id,
            topic = %self.config.topic,
            length = payload_length,
            "Message sent"
        );

        Ok(MessageReceipt {
            message_id,
            payload,
            payload_length,
            status: MessageStatus::Enqueued,
            topic: self.config.topic.clone(),
            sent_at: Utc::now(),
        })
    }

    /// Inbound entry point for transports
    pub fn deliver(&self, payload: MessagePayload) {
        debug!(length = payload.char_len(), "Message received and queued");
        self.buffer.enqueue(payload);
    }

    /// Remove and return a random buffered message
    pub fn retrieve(&self) -> MessagingResult<MessageReceipt> {
        let payload = self.buffer.take_one()?;
        let payload_length = payload.char_len();

        Ok(MessageReceipt {
            message_id: Uuid::new_v4().to_string(),
            payload,
            payload_length,
            status: MessageStatus::Retrieved,
            topic: self.config.topic.clone(),
            sent_at: Utc::now(),
        })
    }

    /// Previews of up to `limit` buffered messages (default from config)
    pub fn peek(&self, limit: Option<usize>) -> MessagingResult<Vec<MessagePreview>> {
        let limit = limit.unwrap_or(self.config.default_peek_limit);
        if limit == 0 {
            return Err(MessagingError::InvalidParameter {
                field: "limit",
                message: "must be at least 1".to_string(),
            });
        }

        let now = Utc::now();
        Ok(self
            .buffer
            .peek_many(limit)
            .iter()
            .map(|payload| MessagePreview {
                id: Uuid::new_v4().to_string(),
                payload_preview: payload.preview(self.config.preview_chars),
                created_at: now,
            })
            .collect())
    }

    pub fn stats(&self) -> MessageStats {
        let stats = self.buffer.stats();
        MessageStats {
            total_sent: stats.total_produced,
            total_consumed: stats.total_consumed,
            current_queue_size: stats.size,
            last_message_timestamp: stats.last_activity,
        }
    }

    pub fn queue_size(&self) -> usize {
        self.buffer.size()
    }

    /// Send `count` messages built from `pattern`.
    ///
    /// `{index}` becomes the 0-based index and `{random}` a number below
    /// 10000. Individual send failures are logged and skipped.
    pub async fn generate(&self, count: usize, pattern: Option<&str>) -> MessagingResult<DatapoolReport> {
        if count == 0 {
            return Err(MessagingError::InvalidParameter {
                field: "count",
                message: "must be at least 1".to_string(),
            });
        }
        if count > self.config.max_generate_count {
            return Err(MessagingError::InvalidParameter {
                field: "count",
                message: format!("must not exceed {}", self.config.max_generate_count),
            });
        }

        let pattern = pattern.unwrap_or(DEFAULT_MESSAGE_PATTERN);
        info!(count, pattern, "Generating messages");

        let mut created = 0;
        for index in 0..count {
            let random = rand::rng().random_range(0..PATTERN_RANDOM_BOUND);
            let payload = pattern
                .replace("{index}", &index.to_string())
                .replace("{random}", &random.to_string());

            match self.send(payload).await {
                Ok(_) => created += 1,
                Err(e) => warn!(index, "Failed to send generated message: {}", e),
            }
        }

        Ok(DatapoolReport {
            kind: "MESSAGES",
            requested_count: count,
            created_count: created,
            name_prefix: pattern.to_string(),
            sample_ids: (0..created.min(SAMPLE_ID_COUNT)).collect(),
        })
    }

    fn validate_payload(&self, payload: &MessagePayload) -> MessagingResult<usize> {
        if payload.as_str().trim().is_empty() {
            return Err(MessagingError::InvalidPayload(
                "Message payload is required".to_string(),
            ));
        }

        let length = payload.char_len();
        if length > self.config.max_payload_chars {
            return Err(MessagingError::InvalidPayload(format!(
                "Message payload must not exceed {} characters",
                self.config.max_payload_chars
            )));
        }

        Ok(length)
    }
}
