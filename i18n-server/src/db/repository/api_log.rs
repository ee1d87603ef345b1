//! API Log Repository
//!
//! 审计日志只追加, 不做软删除; 清理任务按保留天数硬删除

use chrono::{Duration, Utc};
use sqlx::types::Json;
use sqlx::SqlitePool;

use shared::models::{ApiLog, ApiLogEntry};
use shared::pagination::Pagination;

use crate::utils::AppResult;

pub async fn insert(pool: &SqlitePool, entry: &ApiLogEntry) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO api_logs (url, method, request_params, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&entry.url)
    .bind(&entry.method)
    .bind(Json(&entry.request_params))
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Filters for the log listing; url 命中时优先于 method
#[derive(Debug, Default, Clone)]
pub struct LogFilter {
    pub method: Option<String>,
    pub url: Option<String>,
}

impl LogFilter {
    /// WHERE 子句与绑定值, url 为精确匹配, method 统一大写
    fn clause(&self) -> Option<(&'static str, String)> {
        if let Some(url) = &self.url {
            Some(("url = ?", url.clone()))
        } else {
            self.method
                .as_ref()
                .map(|m| ("method = ?", m.to_uppercase()))
        }
    }
}

/// Newest-first page of logs matching the filter
pub async fn find_all(
    pool: &SqlitePool,
    pagination: &Pagination,
    filter: &LogFilter,
) -> AppResult<(Vec<ApiLog>, i64)> {
    let (data, total) = match filter.clause() {
        Some((clause, value)) => {
            let data = sqlx::query_as::<_, ApiLog>(&format!(
                "SELECT * FROM api_logs WHERE {clause}
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
            ))
            .bind(&value)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(pool)
            .await?;
            let total: i64 =
                sqlx::query_scalar(&format!("SELECT COUNT(*) FROM api_logs WHERE {clause}"))
                    .bind(&value)
                    .fetch_one(pool)
                    .await?;
            (data, total)
        }
        None => {
            let data = sqlx::query_as::<_, ApiLog>(
                "SELECT * FROM api_logs ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            )
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(pool)
            .await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api_logs")
                .fetch_one(pool)
                .await?;
            (data, total)
        }
    };

    Ok((data, total))
}

/// Delete logs older than the retention window, returning the deleted count
pub async fn clean_old(pool: &SqlitePool, retention_days: i64) -> AppResult<u64> {
    let cutoff = Utc::now() - Duration::days(retention_days);
    let result = sqlx::query("DELETE FROM api_logs WHERE created_at < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn clear_all(pool: &SqlitePool) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM api_logs").execute(pool).await?;
    Ok(result.rows_affected())
}
