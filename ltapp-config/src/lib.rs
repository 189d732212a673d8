//! Domain-driven configuration management for ltapp
//!
//! Configuration is split by functional domain (server, logging, load,
//! messaging), each with its own defaults and validation, and can be
//! loaded from YAML/JSON files with `LTAPP_*` environment overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    load::LoadConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    messaging::{MessagingConfig, TransportConfig, TransportKind},
    server::ServerConfig,
    LtappConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
