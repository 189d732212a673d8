//! Process resource sampling

use parking_lot::Mutex;
use serde::Serialize;
use sysinfo::{get_current_pid, Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// CPU and memory figures for this process
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub pid: Option<u32>,
    /// Percent of one core since the previous sample; the first sample reads 0
    pub cpu_usage_percent: f32,
    pub memory_rss_bytes: u64,
    pub virtual_memory_bytes: u64,
    pub available_cores: usize,
}

/// Samples the current process through `sysinfo`
pub struct ProcessSampler {
    pid: Option<Pid>,
    system: Mutex<System>,
    refresh: ProcessRefreshKind,
}

impl ProcessSampler {
    pub fn new() -> Self {
        let refresh = ProcessRefreshKind::nothing().with_cpu().with_memory();
        let pid = match get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("Process metrics unavailable: {}", e);
                None
            }
        };

        Self {
            pid,
            system: Mutex::new(System::new_with_specifics(
                RefreshKind::nothing().with_processes(refresh),
            )),
            refresh,
        }
    }

    pub fn sample(&self) -> ProcessMetrics {
        let available_cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let Some(pid) = self.pid else {
            return ProcessMetrics {
                available_cores,
                ..Default::default()
            };
        };

        let mut system = self.system.lock();
        system.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, self.refresh);

        match system.process(pid) {
            Some(process) => ProcessMetrics {
                pid: Some(pid.as_u32()),
                cpu_usage_percent: process.cpu_usage(),
                memory_rss_bytes: process.memory(),
                virtual_memory_bytes: process.virtual_memory(),
                available_cores,
            },
            None => ProcessMetrics {
                pid: Some(pid.as_u32()),
                available_cores,
                ..Default::default()
            },
        }
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reports_own_process() {
        let sampler = ProcessSampler::new();
        let metrics = sampler.sample();

        assert_eq!(metrics.pid, Some(std::process::id()));
        assert!(metrics.memory_rss_bytes > 0);
        assert!(metrics.available_cores >= 1);
    }
}
