//! Core data types shared across retrieval, prompting, and the HTTP API.

use serde::{Deserialize, Serialize};

/// A help article as projected for retrieval. The backing table also carries
/// `keywords` and `last_updated`, but only these two columns reach the
/// prompt and the response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Inbound chat payload. One per HTTP call.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Outbound chat payload: the model's answer plus the titles of the
/// articles that were placed in its context, in retrieval order.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(rename = "contextUsed")]
    pub context_used: Vec<String>,
}
