//! Domain-specific configuration modules

pub mod load;
pub mod logging;
pub mod messaging;
pub mod server;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main ltapp configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LtappConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// CPU and memory pressure configuration
    #[serde(default)]
    pub load: load::LoadConfig,

    /// Message buffer and transport configuration
    #[serde(default)]
    pub messaging: messaging::MessagingConfig,
}

impl LtappConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.load.validate()?;
        self.messaging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = LtappConfig::default();
        serde_yaml::to_string(&config).unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
