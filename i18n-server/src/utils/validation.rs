//! Input validation helpers
//!
//! Path-id parsing plus extractors that run `validator` rules and map
//! framework rejections onto the stable PARSE_ERROR / VALIDATION_ERROR
//! codes.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, OptionalFromRequest, Query, Request,
        rejection::JsonRejection,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::AppError;

/// Parse a path segment as a positive integer id
///
/// Matches the route contract: ids are positive integers, anything else
/// is a 400 BAD_REQUEST before the database is touched.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request("id must be a positive integer")),
    }
}

/// JSON body extractor that also runs `validator` rules
///
/// - malformed JSON → 400 PARSE_ERROR
/// - shape/type mismatch → 400 VALIDATION_ERROR
/// - failed `#[validate]` rules → 400 VALIDATION_ERROR with field details
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => AppError::validation(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => AppError::parse(e.body_text()),
                other => AppError::parse(other.body_text()),
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// `Option<ValidJson<T>>` support: a request without a JSON body
/// (no `Content-Type: application/json`) extracts as `None` instead of
/// rejecting, for endpoints whose body is optional. A body that IS
/// present still goes through the full parse/validate path.
impl<T, S> OptionalFromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => {
                value.validate()?;
                Ok(Some(Self(value)))
            }
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
            Err(JsonRejection::JsonDataError(e)) => Err(AppError::validation(e.body_text())),
            Err(JsonRejection::JsonSyntaxError(e)) => Err(AppError::parse(e.body_text())),
            Err(other) => Err(AppError::parse(other.body_text())),
        }
    }
}

/// Query-string extractor with `validator` rules (pagination etc.)
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_positive() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("1").unwrap(), 1);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }
}
