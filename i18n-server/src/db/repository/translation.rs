//! Translation Repository
//!
//! 翻译条目与业务标签之间有外键关联, 读取时联表过滤,
//! 避免返回挂在已删除业务标签下的条目

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use shared::models::{Translation, TranslationMap, TranslationPayload};
use shared::pagination::Pagination;

use crate::utils::{AppError, AppResult};

pub async fn create(pool: &SqlitePool, payload: &TranslationPayload) -> AppResult<Translation> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO translations (name, description, business_tag_id, translations, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.business_tag_id)
    .bind(Json(&payload.translations))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Inserted translation not found"))
}

/// Active translations whose business tag is also active
pub async fn find_all(
    pool: &SqlitePool,
    pagination: &Pagination,
) -> AppResult<(Vec<Translation>, i64)> {
    let data = sqlx::query_as::<_, Translation>(
        "SELECT t.* FROM translations t
         INNER JOIN business_tags b ON b.id = t.business_tag_id
         WHERE t.deleted_at IS NULL AND b.deleted_at IS NULL
         ORDER BY t.id LIMIT ? OFFSET ?",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM translations t
         INNER JOIN business_tags b ON b.id = t.business_tag_id
         WHERE t.deleted_at IS NULL AND b.deleted_at IS NULL",
    )
    .fetch_one(pool)
    .await?;

    Ok((data, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Translation>> {
    let translation = sqlx::query_as::<_, Translation>(
        "SELECT t.* FROM translations t
         INNER JOIN business_tags b ON b.id = t.business_tag_id
         WHERE t.id = ? AND t.deleted_at IS NULL AND b.deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(translation)
}

/// All active translation maps, for the merged JSON export
pub async fn export_maps(pool: &SqlitePool) -> AppResult<Vec<Json<TranslationMap>>> {
    let maps: Vec<Json<TranslationMap>> = sqlx::query_scalar(
        "SELECT t.translations FROM translations t
         INNER JOIN business_tags b ON b.id = t.business_tag_id
         WHERE t.deleted_at IS NULL AND b.deleted_at IS NULL
         ORDER BY t.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(maps)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    payload: &TranslationPayload,
) -> AppResult<Translation> {
    sqlx::query(
        "UPDATE translations
         SET name = ?, description = ?, business_tag_id = ?, translations = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.business_tag_id)
    .bind(Json(&payload.translations))
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Translation {} not found", id)))
}

/// Soft-delete checks only the translation's own state, 不看业务标签
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> AppResult<Translation> {
    let deleted = sqlx::query_as::<_, Translation>(
        "SELECT * FROM translations WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found(format!("Translation {} not found", id)))?;

    let now = Utc::now();
    sqlx::query(
        "UPDATE translations SET deleted_at = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(deleted)
}
