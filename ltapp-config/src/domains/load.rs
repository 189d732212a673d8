//! CPU and memory pressure configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_range, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound accepted for `max_cpu_threads`
pub const HARD_MAX_CPU_THREADS: usize = 4096;

/// Load generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Worker threads used when CPU load is enabled without an explicit count
    #[serde(default = "default_cpu_threads")]
    pub cpu_threads: usize,

    /// Largest thread count a caller may request
    #[serde(default = "default_max_cpu_threads")]
    pub max_cpu_threads: usize,

    /// How long a CPU stop waits for workers to drain before detaching them
    #[serde(default = "default_cpu_stop_timeout_ms")]
    pub cpu_stop_timeout_ms: u64,

    /// Bytes retained per memory growth step
    #[serde(default = "default_memory_chunk_bytes")]
    pub memory_chunk_bytes: usize,

    /// Pause between memory growth steps
    #[serde(default = "default_memory_interval_ms")]
    pub memory_interval_ms: u64,

    /// How long a memory stop waits for the growth task before detaching it
    #[serde(default = "default_memory_stop_timeout_ms")]
    pub memory_stop_timeout_ms: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            cpu_threads: default_cpu_threads(),
            max_cpu_threads: default_max_cpu_threads(),
            cpu_stop_timeout_ms: default_cpu_stop_timeout_ms(),
            memory_chunk_bytes: default_memory_chunk_bytes(),
            memory_interval_ms: default_memory_interval_ms(),
            memory_stop_timeout_ms: default_memory_stop_timeout_ms(),
        }
    }
}

impl LoadConfig {
    pub fn cpu_stop_timeout(&self) -> Duration {
        Duration::from_millis(self.cpu_stop_timeout_ms)
    }

    pub fn memory_interval(&self) -> Duration {
        Duration::from_millis(self.memory_interval_ms)
    }

    pub fn memory_stop_timeout(&self) -> Duration {
        Duration::from_millis(self.memory_stop_timeout_ms)
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_range(self.max_cpu_threads, 1, HARD_MAX_CPU_THREADS, "max_cpu_threads", self.domain_name())?;
        validate_range(self.cpu_threads, 1, self.max_cpu_threads, "cpu_threads", self.domain_name())?;
        validate_positive(self.cpu_stop_timeout_ms, "cpu_stop_timeout_ms", self.domain_name())?;
        validate_positive(self.memory_chunk_bytes, "memory_chunk_bytes", self.domain_name())?;
        validate_positive(self.memory_interval_ms, "memory_interval_ms", self.domain_name())?;
        validate_positive(self.memory_stop_timeout_ms, "memory_stop_timeout_ms", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

fn default_cpu_threads() -> usize {
    15
}

fn default_max_cpu_threads() -> usize {
    256
}

fn default_cpu_stop_timeout_ms() -> u64 {
    2000
}

fn default_memory_chunk_bytes() -> usize {
    1024 * 1024
}

fn default_memory_interval_ms() -> u64 {
    100
}

fn default_memory_stop_timeout_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        let config = LoadConfig::default();
        assert_eq!(config.cpu_threads, 15);
        assert_eq!(config.memory_chunk_bytes, 1_048_576);
        assert_eq!(config.memory_interval(), Duration::from_millis(100));
        assert_eq!(config.cpu_stop_timeout(), Duration::from_secs(2));
        assert_eq!(config.memory_stop_timeout(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cpu_threads_must_fit_max() {
        let config = LoadConfig {
            cpu_threads: 32,
            max_cpu_threads: 16,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoadConfig {
            cpu_threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_memory_settings_rejected() {
        let config = LoadConfig {
            memory_chunk_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoadConfig {
            memory_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoadConfig {
            memory_stop_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
