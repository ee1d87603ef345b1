//! HTTP 中间件
//!
//! - [`logging`] - 结构化请求日志
//! - [`api_logger`] - 请求审计入库

pub mod api_logger;
pub mod logging;

pub use api_logger::api_logger_middleware;
pub use logging::logging_middleware;
