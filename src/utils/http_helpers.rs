use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::error;

use crate::store::StoreError;

/// Closed set of error kinds a handler can surface to a client.
///
/// Every variant maps to a fixed status code and a JSON body carrying a
/// human-readable `message`. Anything not classifiable lands in `Store`,
/// which is logged in full and surfaced as an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input (400). `details` carries extra
    /// machine-readable context, e.g. which fields were missing.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    /// A unique field collided with an existing record (400).
    #[error("{message}")]
    Conflict {
        message: String,
        field: &'static str,
    },

    /// Bad credentials or a missing/invalid bearer token (401).
    #[error("{0}")]
    Auth(&'static str),

    /// An owner-scoped record was absent (404). Also masks records owned
    /// by other users.
    #[error("{0}")]
    NotFound(&'static str),

    /// Persistence-layer failure (500).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Validation failure with just a message.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation { message, details } => {
                let mut body = json!({ "message": message });
                if let Some(details) = details {
                    body["missing"] = details;
                }
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Conflict { message, field } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "field": field }),
            ),
            ApiError::Auth(message) => (StatusCode::UNAUTHORIZED, json!({ "message": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Store(e) => {
                // Full detail goes to the logs, never to the client.
                error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Something went wrong!" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections are [`ApiError::Validation`]
/// responses (400) instead of axum's default 422s, so malformed bodies and
/// type errors (e.g. an unparseable due date) share the validation shape.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection @ JsonRejection::JsonDataError(_))
            | Err(rejection @ JsonRejection::JsonSyntaxError(_)) => {
                Err(ApiError::validation(rejection.body_text()))
            }
            Err(rejection) => Err(ApiError::validation(rejection.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn test_validation_response_shape() {
        let error = ApiError::Validation {
            message: "All fields are required".to_string(),
            details: Some(json!({ "username": true, "email": false, "password": false })),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "All fields are required");
        assert_eq!(body["missing"]["username"], true);
    }

    #[tokio::test]
    async fn test_conflict_response_names_field() {
        let error = ApiError::Conflict {
            message: "User already exists".to_string(),
            field: "email",
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["field"], "email");
    }

    #[tokio::test]
    async fn test_store_error_is_opaque() {
        let error = ApiError::Store(StoreError::Database(
            "UNIQUE constraint failed: users.email".to_string(),
        ));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Something went wrong!");
        assert!(body.get("error").is_none());
    }
}
