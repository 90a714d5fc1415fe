use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON request body extractor.
///
/// Unlike `axum::Json`, the content type is not checked and every decode
/// failure (empty body, malformed JSON, wrong field types) is rejected with
/// `AppError::InvalidPayload`, so handlers see one error channel.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::InvalidPayload(anyhow::anyhow!("Failed to read request body: {}", e))
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::InvalidPayload(anyhow::anyhow!("Failed to decode request body: {}", e))
        })?;

        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::BlogPayload;
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<JsonBody<BlogPayload>, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/api/blogs")
            .body(Body::from(body))
            .unwrap();
        JsonBody::<BlogPayload>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn decodes_without_content_type() {
        let JsonBody(payload) = extract(r#"{"title":"a","body":"b"}"#).await.unwrap();
        assert_eq!(payload.title, "a");
        assert_eq!(payload.body, "b");
    }

    #[tokio::test]
    async fn empty_body_is_invalid_payload() {
        let err = extract("").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_payload() {
        let err = extract("{not json").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }
}
