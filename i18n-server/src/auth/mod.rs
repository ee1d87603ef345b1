//! 认证模块 - JWT 令牌与当前用户提取
//!
//! # 内容
//!
//! - [`JwtService`] - 令牌生成与验证
//! - [`CurrentUser`] - 请求中的已认证用户 (axum extractor)

pub mod extractor;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};
