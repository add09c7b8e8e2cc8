//! `Path` with the JSON error envelope instead of axum's plain-text rejection.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

/// Drop-in for `axum::extract::Path`; a malformed segment is a validation error.
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), error = %rejection.body_text(), "bad path parameter");
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::{routing::get, Router};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn show(Path(id): Path<Uuid>) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn test_malformed_uuid_uses_error_envelope() {
        let app = Router::new().route("/item/:id", get(show));
        let res = app
            .oneshot(Request::builder().uri("/item/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_well_formed_uuid_passes_through() {
        let id = Uuid::new_v4();
        let app = Router::new().route("/item/:id", get(show));
        let res = app
            .oneshot(Request::builder().uri(format!("/item/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, id.to_string().as_bytes());
    }
}
