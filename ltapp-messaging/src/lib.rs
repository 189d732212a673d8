//! Message buffering for ltapp
//!
//! This crate provides the concurrent [`MessageBuffer`], the opaque
//! [`MessageTransport`] it exchanges payloads through, and the
//! [`MessageService`] that validates and records sends on top of both.

pub mod buffer;
pub mod errors;
pub mod payload;
pub mod service;
pub mod transport;

// Re-export main types
pub use buffer::{BufferStats, MessageBuffer};
pub use errors::{MessagingError, MessagingResult, TransportError};
pub use payload::MessagePayload;
pub use service::{
    DatapoolReport, MessagePreview, MessageReceipt, MessageService, MessageStats, MessageStatus,
    DEFAULT_MESSAGE_PATTERN,
};
pub use transport::{
    build_transport, DeliveryMonitor, InboundDelivery, LoopbackTransport, MessageTransport,
    SinkTransport,
};
