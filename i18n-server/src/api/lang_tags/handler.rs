//! Language Tag API Handlers

use axum::extract::{Path, State};

use shared::models::{LangTag, LangTagPayload};
use shared::pagination::{Page, Pagination};

use crate::core::ServerState;
use crate::db::repository::lang_tag;
use crate::utils::{parse_id, ApiResponse, AppError, AppResult, ValidJson, ValidQuery};

/// GET /api/lang-tags - 分页获取语言标签
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(pagination): ValidQuery<Pagination>,
) -> AppResult<ApiResponse<Page<LangTag>>> {
    let (data, total) = lang_tag::find_all(&state.db.pool, &pagination).await?;
    let page = Page::new(data, total, &pagination);
    Ok(ApiResponse::ok("Lang tags retrieved successfully", page))
}

/// GET /api/lang-tags/:id - 获取单个语言标签
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LangTag>> {
    let id = parse_id(&id)?;
    let tag = lang_tag::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Lang tag {} not found", id)))?;
    Ok(ApiResponse::ok("Lang tag retrieved successfully", tag))
}

/// POST /api/lang-tags - 创建语言标签
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<LangTagPayload>,
) -> AppResult<ApiResponse<LangTag>> {
    let tag = lang_tag::create(&state.db.pool, &payload).await?;
    Ok(ApiResponse::created("Lang tag created successfully", tag))
}

/// PUT /api/lang-tags/:id - 更新语言标签
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<LangTagPayload>,
) -> AppResult<ApiResponse<LangTag>> {
    let id = parse_id(&id)?;
    let tag = lang_tag::update(&state.db.pool, id, &payload).await?;
    Ok(ApiResponse::ok("Lang tag updated successfully", tag))
}

/// DELETE /api/lang-tags/:id - 软删除语言标签
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LangTag>> {
    let id = parse_id(&id)?;
    let tag = lang_tag::soft_delete(&state.db.pool, id).await?;
    Ok(ApiResponse::ok("Lang tag deleted successfully", tag))
}
