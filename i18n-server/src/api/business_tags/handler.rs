//! Business Tag API Handlers

use axum::extract::{Path, State};

use shared::models::{BusinessTag, BusinessTagPayload};
use shared::pagination::{Page, Pagination};

use crate::core::ServerState;
use crate::db::repository::business_tag;
use crate::utils::{parse_id, ApiResponse, AppError, AppResult, ValidJson, ValidQuery};

/// GET /api/business-tags - 分页获取业务标签
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(pagination): ValidQuery<Pagination>,
) -> AppResult<ApiResponse<Page<BusinessTag>>> {
    let (data, total) = business_tag::find_all(&state.db.pool, &pagination).await?;
    let page = Page::new(data, total, &pagination);
    Ok(ApiResponse::ok("Business tags retrieved successfully", page))
}

/// GET /api/business-tags/:id - 获取单个业务标签
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BusinessTag>> {
    let id = parse_id(&id)?;
    let tag = business_tag::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Business tag {} not found", id)))?;
    Ok(ApiResponse::ok("Business tag retrieved successfully", tag))
}

/// POST /api/business-tags - 创建业务标签
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<BusinessTagPayload>,
) -> AppResult<ApiResponse<BusinessTag>> {
    let tag = business_tag::create(&state.db.pool, &payload).await?;
    Ok(ApiResponse::created(
        "Business tag created successfully",
        tag,
    ))
}

/// PUT /api/business-tags/:id - 更新业务标签
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<BusinessTagPayload>,
) -> AppResult<ApiResponse<BusinessTag>> {
    let id = parse_id(&id)?;
    let tag = business_tag::update(&state.db.pool, id, &payload).await?;
    Ok(ApiResponse::ok("Business tag updated successfully", tag))
}

/// DELETE /api/business-tags/:id - 软删除业务标签
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BusinessTag>> {
    let id = parse_id(&id)?;
    let tag = business_tag::soft_delete(&state.db.pool, id).await?;
    Ok(ApiResponse::ok("Business tag deleted successfully", tag))
}
