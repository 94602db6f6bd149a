// Request extractors that report malformed input as `AppError`
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. An empty body deserializes as `T::default()`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::invalid_value())?;

        parse_json_body(&bytes).map(JsonBody)
    }
}

fn parse_json_body<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        AppError::invalid_value()
    })
}

/// Query string with malformed input reported as a bad request
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected query string: {}", e);
                AppError::invalid_value()
            })?;

        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateComment, VoteUpdate};

    #[test]
    fn test_empty_body_is_default() {
        let body: VoteUpdate = parse_json_body(b"").unwrap();
        assert!(body.inc_votes.is_none());

        let body: CreateComment = parse_json_body(b"  \n").unwrap();
        assert!(body.username.is_none());
        assert!(body.body.is_none());
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let err = parse_json_body::<CreateComment>(b"{\"username\":").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = parse_json_body::<CreateComment>(b"{\"username\": 42}").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let body: CreateComment =
            parse_json_body(br#"{"username":"lurker","body":"hi","mood":"smiley"}"#).unwrap();
        assert_eq!(body.username.as_deref(), Some("lurker"));
    }
}
