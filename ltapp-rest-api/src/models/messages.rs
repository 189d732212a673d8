//! Message request/response models

use serde::{Deserialize, Serialize};

/// Body of `POST /messages`
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueCountResponse {
    pub count: usize,
    pub queue_name: &'static str,
}

impl QueueCountResponse {
    pub fn internal(count: usize) -> Self {
        Self {
            count,
            queue_name: "internal",
        }
    }
}
