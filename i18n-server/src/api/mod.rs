//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 服务信息与健康检查
//! - [`auth`] - 注册 / 登录
//! - [`business_tags`] - 业务标签管理
//! - [`lang_tags`] - 语言标签管理
//! - [`translations`] - 翻译条目管理与导出
//! - [`api_logs`] - 审计日志查询与清理

use axum::Router;

use crate::core::ServerState;
use crate::utils::AppError;

pub mod api_logs;
pub mod auth;
pub mod business_tags;
pub mod health;
pub mod lang_tags;
pub mod translations;

/// 汇总全部业务路由; 未匹配路径统一走 NOT_FOUND 信封
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(business_tags::router())
        .merge(lang_tags::router())
        .merge(translations::router())
        .merge(api_logs::router())
        .fallback(fallback)
}

async fn fallback() -> AppError {
    AppError::not_found("Route not found")
}
