//! Business Tag Repository

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::{BusinessTag, BusinessTagPayload};
use shared::pagination::Pagination;

use crate::utils::{AppError, AppResult};

/// Insert a new business tag and return it by its generated id
pub async fn create(pool: &SqlitePool, payload: &BusinessTagPayload) -> AppResult<BusinessTag> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO business_tags (name, description, created_at, updated_at)
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
        .ok_or_else(|| AppError::database("Inserted business tag not found"))
}

/// One page of active business tags plus the active total
pub async fn find_all(
    pool: &SqlitePool,
    pagination: &Pagination,
) -> AppResult<(Vec<BusinessTag>, i64)> {
    let data = sqlx::query_as::<_, BusinessTag>(
        "SELECT * FROM business_tags WHERE deleted_at IS NULL ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM business_tags WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

    Ok((data, total))
}

/// Find an active business tag by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<BusinessTag>> {
    let tag = sqlx::query_as::<_, BusinessTag>(
        "SELECT * FROM business_tags WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(tag)
}

/// Update an active business tag, touching updated_at
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    payload: &BusinessTagPayload,
) -> AppResult<BusinessTag> {
    sqlx::query(
        "UPDATE business_tags SET name = ?, description = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    // Post-update re-query doubles as the existence check
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Business tag {} not found", id)))
}

/// Soft-delete: set deleted_at and updated_at, keep the row
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> AppResult<BusinessTag> {
    let deleted = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Business tag {} not found", id)))?;

    let now = Utc::now();
    sqlx::query(
        "UPDATE business_tags SET deleted_at = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(deleted)
}
