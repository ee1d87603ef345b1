//! Translation API Handlers
//!
//! 创建/更新前校验业务标签存在且未删除, 并校验翻译表里的
//! 语言键全部对应有效的语言标签

use std::collections::BTreeSet;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use shared::models::{Translation, TranslationMap, TranslationPayload};
use shared::pagination::{Page, Pagination};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{business_tag, lang_tag, translation};
use crate::utils::{parse_id, ApiResponse, AppError, AppResult, ValidJson, ValidQuery};

/// 业务标签有效性 + 语言键有效性, 多项不满足时报告先发现的那项
async fn validate_payload(state: &ServerState, payload: &TranslationPayload) -> AppResult<()> {
    if payload.translations.is_empty() {
        return Err(AppError::bad_request("translations must not be empty"));
    }

    if business_tag::find_by_id(&state.db.pool, payload.business_tag_id)
        .await?
        .is_none()
    {
        return Err(AppError::bad_request(format!(
            "Business tag {} does not exist",
            payload.business_tag_id
        )));
    }

    let valid: BTreeSet<String> = lang_tag::active_names(&state.db.pool)
        .await?
        .into_iter()
        .collect();
    let unknown: Vec<String> = payload
        .lang_keys()
        .into_iter()
        .filter(|k| !valid.contains(*k))
        .map(String::from)
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::bad_request_with_details(
            "Translation map contains unknown language keys",
            serde_json::json!({ "unknownLangKeys": unknown }),
        ));
    }

    Ok(())
}

/// GET /api/translations - 分页获取翻译条目
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(pagination): ValidQuery<Pagination>,
) -> AppResult<ApiResponse<Page<Translation>>> {
    let (data, total) = translation::find_all(&state.db.pool, &pagination).await?;
    let page = Page::new(data, total, &pagination);
    Ok(ApiResponse::ok("Translations retrieved successfully", page))
}

/// GET /api/translations/:id - 获取单个翻译条目
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Translation>> {
    let id = parse_id(&id)?;
    let t = translation::find_by_id(&state.db.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Translation {} not found", id)))?;
    Ok(ApiResponse::ok("Translation retrieved successfully", t))
}

/// POST /api/translations - 创建翻译条目
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<TranslationPayload>,
) -> AppResult<ApiResponse<Translation>> {
    validate_payload(&state, &payload).await?;
    let t = translation::create(&state.db.pool, &payload).await?;
    Ok(ApiResponse::created("Translation created successfully", t))
}

/// PUT /api/translations/:id - 更新翻译条目
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<TranslationPayload>,
) -> AppResult<ApiResponse<Translation>> {
    let id = parse_id(&id)?;
    validate_payload(&state, &payload).await?;
    let t = translation::update(&state.db.pool, id, &payload).await?;
    Ok(ApiResponse::ok("Translation updated successfully", t))
}

/// DELETE /api/translations/:id - 软删除翻译条目
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Translation>> {
    let id = parse_id(&id)?;
    let t = translation::soft_delete(&state.db.pool, id).await?;
    Ok(ApiResponse::ok("Translation deleted successfully", t))
}

/// GET /api/translations/export/json - 导出全部有效翻译
///
/// 需要 Bearer token; 按 id 顺序输出每条记录的翻译表, 作为可下载的
/// JSON 文件返回, 不走统一信封
pub async fn export_json(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let maps: Vec<TranslationMap> = translation::export_maps(&state.db.pool)
        .await?
        .into_iter()
        .map(|m| m.0)
        .collect();

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=translations.json",
        )],
        Json(maps),
    ))
}
