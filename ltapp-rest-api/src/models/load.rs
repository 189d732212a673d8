//! Load control request/response models

use ltapp_pressure::LoadStatus;
use serde::{Deserialize, Serialize};

use crate::process::ProcessMetrics;

/// Query of `/startCPULoad`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpuLoadQuery {
    pub threads: Option<usize>,
}

/// Body of every enable/disable response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadStatusResponse {
    pub status: String,
}

impl LoadStatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Generator state plus what the process is actually consuming
#[derive(Debug, Clone, Serialize)]
pub struct LoadOverview {
    pub generators: LoadStatus,
    pub process: ProcessMetrics,
}
