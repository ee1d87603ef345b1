//! Unified error handling
//!
//! Application error enum plus the two response envelopes:
//! - success: `{ statusCode, message, result }`
//! - error:   `{ success: false, statusCode, error: { code, message, details? } }`
//!
//! Business logic only ever produces [`AppError`] variants; the single
//! [`IntoResponse`] impl is the boundary translator to HTTP.
//!
//! # Error codes
//!
//! | Variant | Status | code |
//! |---------|--------|------|
//! | BadRequest | 400 | BAD_REQUEST |
//! | Validation | 400 | VALIDATION_ERROR |
//! | Parse | 400 | PARSE_ERROR |
//! | Unauthorized / InvalidToken / TokenExpired | 401 | UNAUTHORIZED |
//! | NotFound | 404 | NOT_FOUND |
//! | Conflict | 409 | CONFLICT |
//! | Database / Internal | 500 | INTERNAL_SERVER_ERROR |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API 统一响应结构 (成功)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with payload
    pub fn ok(message: impl Into<String>, result: T) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            result: Some(result),
        }
    }

    /// 201 with payload
    pub fn created(message: impl Into<String>, result: T) -> Self {
        Self {
            status_code: 201,
            message: message.into(),
            result: Some(result),
        }
    }
}

impl ApiResponse<()> {
    /// 200 without payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            result: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error payload nested under `error`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: ErrorBody,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Authorization token required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // ========== 系统错误 (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Unified message for unknown email / wrong password, so login
    /// failures never reveal which one was wrong
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            // Authentication errors (401) — one stable code for all three
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authorization token required".to_string(),
                None,
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Token expired".to_string(),
                None,
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid token".to_string(),
                None,
            ),

            // Client errors (400)
            AppError::BadRequest { message, details } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message, details)
            }
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, details)
            }
            AppError::Parse(message) => {
                (StatusCode::BAD_REQUEST, "PARSE_ERROR", message, None)
            }

            // Not found (404)
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message, None)
            }

            // Conflict (409)
            AppError::Conflict(message) => {
                (StatusCode::CONFLICT, "CONFLICT", message, None)
            }

            // System errors (500): log the real cause, redact the response
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal Server Error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            status_code: status.as_u16(),
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

// ========== Conversions from library error types ==========

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).ok();
        AppError::Validation {
            message: "Validation failed".to_string(),
            details,
        }
    }
}

impl From<crate::auth::JwtError> for AppError {
    fn from(e: crate::auth::JwtError) -> Self {
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (AppError::validation("invalid"), StatusCode::BAD_REQUEST),
            (AppError::parse("broken json"), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::conflict("dup"), StatusCode::CONFLICT),
            (
                AppError::database("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_server_errors_are_redacted() {
        let response = AppError::database("secret dsn in here").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
