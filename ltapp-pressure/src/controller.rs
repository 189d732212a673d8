//! Load controller
//!
//! Facade over the CPU and memory generators. Every operation completes its
//! effect before returning and reports only a status line.

use crate::cpu::{CpuPressureGenerator, CpuStatus};
use crate::error::PressureResult;
use crate::memory::{MemoryPressureGenerator, MemoryStatus};
use ltapp_config::LoadConfig;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub const CPU_LOAD_ENABLED: &str = "CPU load Enabled";
pub const CPU_LOAD_DISABLED: &str = "CPU load Disabled";
pub const MEMORY_LEAK_ENABLED: &str = "Memory Leak Enabled";
pub const MEMORY_LEAK_DISABLED: &str = "Memory Leak Disabled";

/// Combined generator status
#[derive(Debug, Clone, Serialize)]
pub struct LoadStatus {
    pub cpu: CpuStatus,
    pub memory: MemoryStatus,
}

pub struct LoadController {
    cpu: Arc<CpuPressureGenerator>,
    memory: Arc<MemoryPressureGenerator>,
    default_cpu_threads: usize,
}

impl LoadController {
    /// Controller with generators built from the load configuration
    pub fn new(config: &LoadConfig) -> Self {
        Self::with_generators(
            Arc::new(CpuPressureGenerator::from_config(config)),
            Arc::new(MemoryPressureGenerator::from_config(config)),
            config.cpu_threads,
        )
    }

    pub fn with_generators(
        cpu: Arc<CpuPressureGenerator>,
        memory: Arc<MemoryPressureGenerator>,
        default_cpu_threads: usize,
    ) -> Self {
        Self {
            cpu,
            memory,
            default_cpu_threads,
        }
    }

    pub fn cpu(&self) -> &Arc<CpuPressureGenerator> {
        &self.cpu
    }

    pub fn memory(&self) -> &Arc<MemoryPressureGenerator> {
        &self.memory
    }

    pub fn default_cpu_threads(&self) -> usize {
        self.default_cpu_threads
    }

    /// Start CPU load with `threads` workers, or the configured default
    pub async fn enable_cpu(&self, threads: Option<usize>) -> PressureResult<&'static str> {
        let threads = threads.unwrap_or(self.default_cpu_threads);
        self.cpu.start(threads).await?;
        Ok(CPU_LOAD_ENABLED)
    }

    pub async fn disable_cpu(&self) -> &'static str {
        self.cpu.stop().await;
        CPU_LOAD_DISABLED
    }

    pub async fn enable_memory(&self) -> &'static str {
        self.memory.start().await;
        MEMORY_LEAK_ENABLED
    }

    pub async fn disable_memory(&self) -> &'static str {
        self.memory.stop().await;
        MEMORY_LEAK_DISABLED
    }

    pub fn status(&self) -> LoadStatus {
        LoadStatus {
            cpu: self.cpu.status(),
            memory: self.memory.status(),
        }
    }

    /// Stop both generators
    pub async fn shutdown(&self) {
        info!("Stopping load generators");
        self.disable_cpu().await;
        self.disable_memory().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RetentionPool;
    use crate::state::GeneratorState;
    use std::time::Duration;

    fn controller() -> LoadController {
        LoadController::with_generators(
            Arc::new(CpuPressureGenerator::new(8, Duration::from_secs(2))),
            Arc::new(MemoryPressureGenerator::with_pool(
                Arc::new(RetentionPool::new()),
                512,
                Duration::from_millis(10),
            )),
            2,
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_status_strings() {
        let controller = controller();

        assert_eq!(controller.enable_cpu(None).await.unwrap(), "CPU load Enabled");
        assert_eq!(controller.status().cpu.requested_workers, 2);
        assert_eq!(controller.disable_cpu().await, "CPU load Disabled");
        assert_eq!(controller.disable_cpu().await, "CPU load Disabled");

        assert_eq!(controller.enable_memory().await, "Memory Leak Enabled");
        assert_eq!(controller.enable_memory().await, "Memory Leak Enabled");
        assert_eq!(controller.disable_memory().await, "Memory Leak Disabled");
        assert_eq!(controller.disable_memory().await, "Memory Leak Disabled");
    }

    #[tokio::test]
    async fn test_invalid_thread_count_surfaces() {
        let controller = controller();
        assert!(controller.enable_cpu(Some(0)).await.is_err());
        assert!(controller.enable_cpu(Some(9)).await.is_err());
        assert_eq!(controller.status().cpu.state, GeneratorState::Stopped);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shutdown_stops_everything() {
        let controller = controller();
        controller.enable_cpu(Some(1)).await.unwrap();
        controller.enable_memory().await;

        controller.shutdown().await;

        let status = controller.status();
        assert_eq!(status.cpu.state, GeneratorState::Stopped);
        assert_eq!(status.memory.state, GeneratorState::Stopped);
    }
}
