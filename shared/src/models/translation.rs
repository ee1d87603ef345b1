//! Translation Model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

/// Translation payload: translation-key → { lang-key → localized string }
///
/// ```json
/// { "greeting": { "en": "Hi", "es": "Hola" } }
/// ```
pub type TranslationMap = BTreeMap<String, BTreeMap<String, String>>;

/// Translation entity — one named bundle of localized strings, owned by
/// a business tag
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Translation {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "businessTagId")]
    pub business_tag_id: i64,
    /// Stored as a JSON column; every lang-key must match an active
    /// lang tag name at write time
    pub translations: Json<TranslationMap>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create/update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TranslationPayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 5, max = 500))]
    pub description: String,
    #[serde(rename = "businessTagId")]
    pub business_tag_id: i64,
    pub translations: TranslationMap,
}

impl TranslationPayload {
    /// All lang-keys used across the payload, deduplicated
    pub fn lang_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .translations
            .values()
            .flat_map(|entry| entry.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}
