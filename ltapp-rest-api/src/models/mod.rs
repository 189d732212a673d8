pub mod common;
pub mod datapools;
pub mod load;
pub mod messages;

// Re-export commonly used types
pub use common::{ApiResponse, HealthResponse, HealthStatus};
pub use datapools::{GenerateMessagesQuery, PeekMessagesQuery};
pub use load::{CpuLoadQuery, LoadOverview, LoadStatusResponse};
pub use messages::{QueueCountResponse, SendMessageRequest};
