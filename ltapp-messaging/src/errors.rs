//! Messaging error types

use thiserror::Error;

/// Result type for messaging operations
pub type MessagingResult<T> = std::result::Result<T, MessagingError>;

/// Failures of the outbound channel
#[derive(Debug, Error)]
pub enum TransportError {
    /// The receiving side of the channel is gone
    #[error("Transport channel is closed")]
    Closed,

    /// Backend-specific publish failure
    #[error("Publish failed: {0}")]
    Publish(String),
}

/// Messaging errors
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Nothing buffered to take
    #[error("No messages available in queue")]
    EmptyBuffer,

    /// Payload rejected before any state change
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Request parameter out of range
    #[error("Invalid {field}: {message}")]
    InvalidParameter { field: &'static str, message: String },

    /// Outbound publish failed; counters were not touched
    #[error("Failed to send message: {0}")]
    TransportFailure(#[from] TransportError),
}
