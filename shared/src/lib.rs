//! Shared types for the i18n translation API
//!
//! Entity models, create/update payloads and pagination types used by
//! the server crate and its integration tests.

pub mod models;
pub mod pagination;

pub use pagination::{Page, Pagination};
