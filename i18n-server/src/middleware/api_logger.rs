//! API 审计中间件
//!
//! 把每个进入的请求 (方法 / 路径 / 参数) 异步写入 api_logs 表,
//! 写库失败只记 warn, 绝不影响请求本身

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use shared::models::ApiLogEntry;

use crate::core::ServerState;

/// 请求体读入内存的上限, 超过的不记录 body
const BODY_CAPTURE_LIMIT: u64 = 64 * 1024;

/// 审计中间件; 排除路径在配置里给出 (登录、日志自查询等)
pub async fn api_logger_middleware(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if state.config.is_audit_excluded(&path) {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let url = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| path.clone());
    let query = req.uri().query().map(str::to_string);

    // 小请求体读出来做记录, 再还原给后续 handler; 大请求体原样放行
    let capture_body = req
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
        <= BODY_CAPTURE_LIMIT;

    let (req, captured_body) = if capture_body {
        let (parts, body) = req.into_parts();
        match to_bytes(body, BODY_CAPTURE_LIMIT as usize).await {
            Ok(bytes) => {
                let captured = if bytes.is_empty() {
                    None
                } else {
                    serde_json::from_slice::<serde_json::Value>(&bytes).ok()
                };
                (Request::from_parts(parts, Body::from(bytes)), captured)
            }
            Err(e) => {
                warn!(error = %e, "failed to buffer request body for audit log");
                (Request::from_parts(parts, Body::empty()), None)
            }
        }
    } else {
        (req, None)
    };

    let entry = ApiLogEntry {
        url,
        method,
        request_params: serde_json::json!({
            "query": query,
            "body": captured_body,
        }),
    };
    let pool = state.db.pool.clone();
    tokio::spawn(async move {
        if let Err(e) = crate::db::repository::api_log::insert(&pool, &entry).await {
            warn!(error = %e, url = %entry.url, "failed to persist api log entry");
        }
    });

    next.run(req).await
}
