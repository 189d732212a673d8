//! Message buffer and transport configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Messaging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Topic name reported on every message response
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Longest accepted payload, in characters
    #[serde(default = "default_max_payload_chars")]
    pub max_payload_chars: usize,

    /// Characters kept in a payload preview before the ellipsis
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Preview count returned when no limit is given
    #[serde(default = "default_peek_limit")]
    pub default_peek_limit: usize,

    /// Most messages a single datapool generation request may send
    #[serde(default = "default_max_generate_count")]
    pub max_generate_count: usize,

    /// Outbound transport
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Which transport carries outbound sends
    #[serde(default)]
    pub kind: TransportKind,

    /// Bound of the loopback channel between send and delivery
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

/// Available transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Sends are delivered back into the buffer through an in-process channel
    #[default]
    Loopback,
    /// Sends are accepted and dropped
    Sink,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            max_payload_chars: default_max_payload_chars(),
            preview_chars: default_preview_chars(),
            default_peek_limit: default_peek_limit(),
            max_generate_count: default_max_generate_count(),
            transport: TransportConfig::default(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::Loopback,
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Loopback => f.write_str("loopback"),
            TransportKind::Sink => f.write_str("sink"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loopback" => Ok(TransportKind::Loopback),
            "sink" => Ok(TransportKind::Sink),
            _ => Err(format!("Invalid transport kind: {}", s)),
        }
    }
}

impl Validatable for MessagingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.topic, "topic", self.domain_name())?;
        validate_positive(self.max_payload_chars, "max_payload_chars", self.domain_name())?;
        validate_positive(self.preview_chars, "preview_chars", self.domain_name())?;
        validate_positive(self.default_peek_limit, "default_peek_limit", self.domain_name())?;
        validate_positive(self.max_generate_count, "max_generate_count", self.domain_name())?;
        self.transport.validate()?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "messaging"
    }
}

impl Validatable for TransportConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.channel_capacity, "channel_capacity", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "messaging.transport"
    }
}

fn default_topic() -> String {
    "load-testing-topic".to_string()
}

fn default_max_payload_chars() -> usize {
    10_000
}

fn default_preview_chars() -> usize {
    50
}

fn default_peek_limit() -> usize {
    100
}

fn default_max_generate_count() -> usize {
    10_000
}

fn default_channel_capacity() -> usize {
    10_000
}
