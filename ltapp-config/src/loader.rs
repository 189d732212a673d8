//! Configuration loading and environment variable handling

use crate::domains::LtappConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "LTAPP".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<LtappConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut config: LtappConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<LtappConfig> {
        let mut config = LtappConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<LtappConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut LtappConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_load_overrides(&mut config.load)?;
        self.apply_messaging_overrides(&mut config.messaging)?;
        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SERVER_PORT: {}", e)))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Apply load config overrides
    fn apply_load_overrides(&self, config: &mut crate::domains::load::LoadConfig) -> ConfigResult<()> {
        if let Ok(threads) = self.get_env_var("CPU_THREADS") {
            config.cpu_threads = threads
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid CPU_THREADS: {}", e)))?;
        }

        if let Ok(interval) = self.get_env_var("MEMORY_INTERVAL_MS") {
            config.memory_interval_ms = interval
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid MEMORY_INTERVAL_MS: {}", e)))?;
        }

        Ok(())
    }

    /// Apply messaging config overrides
    fn apply_messaging_overrides(
        &self,
        config: &mut crate::domains::messaging::MessagingConfig,
    ) -> ConfigResult<()> {
        if let Ok(topic) = self.get_env_var("MESSAGING_TOPIC") {
            config.topic = topic;
        }

        if let Ok(kind) = self.get_env_var("TRANSPORT_KIND") {
            config.transport.kind = crate::domains::messaging::TransportKind::from_str(&kind)
                .map_err(|_| ConfigError::EnvError(format!("Invalid TRANSPORT_KIND: {}", kind)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
