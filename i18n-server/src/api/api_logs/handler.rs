//! API Log Handlers
//!
//! 审计日志的查询与清理接口

use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::ApiLog;
use shared::pagination::{Page, Pagination};

use crate::core::ServerState;
use crate::db::repository::api_log;
use crate::utils::{ApiResponse, AppResult, ValidJson, ValidQuery};

/// 日志列表默认每页 20 条, 比其他列表接口大一档
const LOG_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize, Validate)]
pub struct LogQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
    /// Optional HTTP method filter, case-insensitive
    pub method: Option<String>,
    /// Optional exact-match filter on the logged url; wins over `method`
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CleanRequest {
    /// Retention window override in days
    #[validate(range(min = 1, max = 3650))]
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CleanResult {
    pub deleted: u64,
}

/// GET /api/api-logs - 分页获取审计日志 (倒序)
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<LogQuery>,
) -> AppResult<ApiResponse<Page<ApiLog>>> {
    let pagination = Pagination {
        page: query.page,
        page_size: Some(query.page_size.unwrap_or(LOG_PAGE_SIZE)),
    };
    let filter = api_log::LogFilter {
        method: query.method,
        url: query.url,
    };
    let (data, total) = api_log::find_all(&state.db.pool, &pagination, &filter).await?;
    let page = Page::new(data, total, &pagination);
    Ok(ApiResponse::ok("API logs retrieved successfully", page))
}

/// POST /api/api-logs/clean - 清理超过保留期的日志
///
/// 请求体可省略, 省略时用配置的保留天数
pub async fn clean(
    State(state): State<ServerState>,
    body: Option<ValidJson<CleanRequest>>,
) -> AppResult<ApiResponse<CleanResult>> {
    let body = body.map(|ValidJson(b)| b).unwrap_or_default();
    let days = body.days.unwrap_or(state.config.log_retention_days);
    let deleted = api_log::clean_old(&state.db.pool, days).await?;
    tracing::info!(deleted, days, "cleaned old api logs");
    Ok(ApiResponse::ok(
        "Old API logs cleaned successfully",
        CleanResult { deleted },
    ))
}

/// POST /api/api-logs/clear-all - 清空全部日志
pub async fn clear_all(State(state): State<ServerState>) -> AppResult<ApiResponse<CleanResult>> {
    let deleted = api_log::clear_all(&state.db.pool).await?;
    tracing::info!(deleted, "cleared all api logs");
    Ok(ApiResponse::ok(
        "All API logs cleared successfully",
        CleanResult { deleted },
    ))
}
