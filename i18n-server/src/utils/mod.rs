//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`ApiResponse`] - API 响应结构
//! - 校验与日志工具

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{ApiResponse, AppError, ErrorBody, ErrorResponse};
pub use result::AppResult;
pub use validation::{ValidJson, ValidQuery, parse_id};
