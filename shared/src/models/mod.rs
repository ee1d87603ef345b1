//! Entity models and payloads
//!
//! One module per table. Each resource follows the same split: the row
//! struct (`sqlx::FromRow`) plus the create/update payloads validated at
//! the route boundary.

pub mod api_log;
pub mod business_tag;
pub mod lang_tag;
pub mod translation;
pub mod user;

pub use api_log::{ApiLog, ApiLogEntry};
pub use business_tag::{BusinessTag, BusinessTagPayload};
pub use lang_tag::{LangTag, LangTagPayload};
pub use translation::{Translation, TranslationMap, TranslationPayload};
pub use user::{LoginRequest, RegisterRequest, User, UserPublic};
