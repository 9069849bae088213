//! Request body extraction for record payloads.

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use models::Record;
use serde_json::Value;

use crate::errors::ApiError;

/// A JSON object body. Any rejection renders as `{"error": ...}`.
#[derive(Debug)]
pub struct JsonRecord(pub Record);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonRecord
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|r| ApiError::new(r.status(), r.body_text()))?;
        models::record::from_value(value)
            .map(JsonRecord)
            .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/users");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn accepts_objects() {
        let JsonRecord(rec) = JsonRecord::from_request(request(Some("application/json"), r#"{"id":"u1"}"#), &())
            .await
            .unwrap();
        assert_eq!(models::record_id(&rec), Some("u1"));
    }

    #[tokio::test]
    async fn non_object_is_unprocessable() {
        let err = JsonRecord::from_request(request(Some("application/json"), "[1,2]"), &())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "record must be a JSON object, got array"));
    }

    #[tokio::test]
    async fn missing_content_type_keeps_axum_status() {
        let err = JsonRecord::from_request(request(None, r#"{"id":"u1"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_client_error() {
        let err = JsonRecord::from_request(request(Some("application/json"), "{"), &())
            .await
            .unwrap_err();
        assert!(err.status.is_client_error());
    }
}
