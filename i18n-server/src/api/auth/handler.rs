//! Auth API Handlers

use axum::extract::State;
use serde::Serialize;

use shared::models::{LoginRequest, RegisterRequest, UserPublic};

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{ApiResponse, AppError, AppResult, ValidJson};

/// 注册和登录共用的返回: 对外用户视图 + 签好的令牌
#[derive(Debug, Serialize)]
pub struct AuthResult {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/register - 注册用户, 直接发放令牌
///
/// 邮箱重复返回 409 CONFLICT
pub async fn register(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> AppResult<ApiResponse<AuthResult>> {
    if user::find_by_email(&state.db.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Email is already registered"));
    }

    let hash = hash_password(&payload.password)?;
    let created = user::create(&state.db.pool, &payload.name, &payload.email, &hash).await?;
    let token = state
        .jwt_service
        .generate_token(created.id, &created.email)?;

    Ok(ApiResponse::created(
        "User registered successfully",
        AuthResult {
            token,
            user: created.public(),
        },
    ))
}

/// POST /api/auth/login - 登录获取 JWT
///
/// 未知邮箱和错误密码返回同一个 401, 不泄露账号是否存在
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResult>> {
    let found = user::find_by_email(&state.db.pool, &payload.email).await?;

    let Some(found) = found else {
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(&payload.password, &found.password) {
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt_service.generate_token(found.id, &found.email)?;

    Ok(ApiResponse::ok(
        "Login successful",
        AuthResult {
            token,
            user: found.public(),
        },
    ))
}
