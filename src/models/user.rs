use axum::async_trait;
use axum::extract::FromRequestParts;
use chrono::{DateTime, Utc};
use http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::utils::http_helpers::ApiError;

/// A stored user record. The password hash never leaves the server;
/// outward-facing responses use [`UserSummary`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The client-visible subset of a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// The authenticated identity injected into protected handlers.
///
/// Extracting this from a request is the access-control step: it reads the
/// `Authorization: Bearer` header and verifies the token. Handlers that take
/// an `AuthUser` argument can only run for authenticated callers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<AuthUser, ApiError> {
        // Retrieve the Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(ApiError::Auth("No token provided"))?;

        match state.tokens.verify(token) {
            Ok(user_id) => Ok(AuthUser { id: user_id }),
            Err(_) => Err(ApiError::Auth("Invalid or expired token")),
        }
    }
}
