//! 健康检查与服务信息

use axum::extract::State;
use axum::{Router, routing::get};
use chrono::Utc;
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// 脱敏后的数据库连接描述
    pub database: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(info))
        .route("/api/health", get(health))
}

/// GET / - 服务信息
pub async fn info() -> ApiResponse<ServiceInfo> {
    ApiResponse::ok(
        "i18n translation service",
        ServiceInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now().to_rfc3339(),
        },
    )
}

/// GET /api/health - 健康检查 (含数据库连通性)
pub async fn health(State(state): State<ServerState>) -> AppResult<ApiResponse<HealthStatus>> {
    if !state.db.ping().await {
        return Err(crate::utils::AppError::database("Database ping failed"));
    }
    Ok(ApiResponse::ok(
        "Service is healthy",
        HealthStatus {
            status: "ok",
            database: state.config.masked_database_url(),
        },
    ))
}
