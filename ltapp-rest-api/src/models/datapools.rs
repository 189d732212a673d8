//! Datapool request models

use serde::Deserialize;

/// Query of `POST /admin/datapools/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateMessagesQuery {
    pub count: Option<usize>,
    pub pattern: Option<String>,
}

/// Query of `GET /admin/datapools/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeekMessagesQuery {
    pub limit: Option<usize>,
}
