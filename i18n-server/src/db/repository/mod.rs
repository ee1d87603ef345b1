//! Repository layer
//!
//! One module per table; free async functions over `&SqlitePool`.
//! Every query on a soft-deletable table filters `deleted_at IS NULL`
//! so deleted rows never leak into new call sites. Creates return the
//! inserted row fetched by its own generated id.

pub mod api_log;
pub mod business_tag;
pub mod lang_tag;
pub mod translation;
pub mod user;
