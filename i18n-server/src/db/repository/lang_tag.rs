//! Language Tag Repository

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::{LangTag, LangTagPayload};
use shared::pagination::Pagination;

use crate::utils::{AppError, AppResult};

pub async fn create(pool: &SqlitePool, payload: &LangTagPayload) -> AppResult<LangTag> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO lang_tags (name, description, created_at, updated_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Inserted lang tag not found"))
}

pub async fn find_all(
    pool: &SqlitePool,
    pagination: &Pagination,
) -> AppResult<(Vec<LangTag>, i64)> {
    let data = sqlx::query_as::<_, LangTag>(
        "SELECT * FROM lang_tags WHERE deleted_at IS NULL ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lang_tags WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;

    Ok((data, total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<LangTag>> {
    let tag = sqlx::query_as::<_, LangTag>(
        "SELECT * FROM lang_tags WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(tag)
}

/// The set of active language tag names, used to validate translation maps
pub async fn active_names(pool: &SqlitePool) -> AppResult<Vec<String>> {
    let names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM lang_tags WHERE deleted_at IS NULL")
            .fetch_all(pool)
            .await?;
    Ok(names)
}

pub async fn update(pool: &SqlitePool, id: i64, payload: &LangTagPayload) -> AppResult<LangTag> {
    sqlx::query(
        "UPDATE lang_tags SET name = ?, description = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Lang tag {} not found", id)))
}

pub async fn soft_delete(pool: &SqlitePool, id: i64) -> AppResult<LangTag> {
    let deleted = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Lang tag {} not found", id)))?;

    let now = Utc::now();
    sqlx::query(
        "UPDATE lang_tags SET deleted_at = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(deleted)
}
