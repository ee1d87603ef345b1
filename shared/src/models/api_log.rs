//! Api Log Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// One recorded API call (append-only audit row)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApiLog {
    pub id: i64,
    pub url: String,
    pub method: String,
    /// Opaque snapshot of the request: `{"query": {...}, "body": {...}}`
    #[serde(rename = "requestParams")]
    pub request_params: Json<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Data captured by the audit middleware before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLogEntry {
    pub url: String,
    pub method: String,
    pub request_params: serde_json::Value,
}
