//! Business Tag Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Business tag entity — a named grouping that translations belong to
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessTag {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; active rows carry `None`
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create/update payload (both operations take the full shape)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BusinessTagPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 500))]
    pub description: String,
}
