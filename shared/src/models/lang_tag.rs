//! Lang Tag Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lang tag entity — a locale identifier usable as a key inside a
/// translation payload (`en`, `pt-BR`, ...)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LangTag {
    pub id: i64,
    /// Locale code; referenced by name from translation payloads
    pub name: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create/update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LangTagPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 500))]
    pub description: String,
}
