//! Registration and login endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::auth::password;
use crate::models::UserSummary;
use crate::state::AppState;
use crate::store::NewUser;
use crate::utils::http_helpers::{ApiError, AppJson};

/// Registers authentication routes. These are the only API routes that do
/// not require a bearer token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    message: String,
    token: String,
    user: UserSummary,
}

/// Minimal syntactic check: one `@` with a non-empty local part and domain.
fn email_is_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Creates a new user account and returns a session token.
async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    // Validate input, reporting every missing field at once.
    if body.username.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation {
            message: "All fields are required".to_string(),
            details: Some(json!({
                "username": body.username.is_empty(),
                "email": body.email.is_empty(),
                "password": body.password.is_empty(),
            })),
        });
    }
    if !email_is_valid(&body.email) {
        return Err(ApiError::validation("Email is not valid"));
    }

    // Check for an existing user on either unique field.
    if let Some(existing) = state
        .store
        .find_user_by_username_or_email(&body.username, &body.email)
        .await?
    {
        warn!("Registration conflict for username='{}'", body.username);
        let field = if existing.email == body.email {
            "email"
        } else {
            "username"
        };
        return Err(ApiError::Conflict {
            message: "User already exists".to_string(),
            field,
        });
    }

    let password_hash = password::hash_password(&body.password)
        .map_err(crate::store::StoreError::Database)?;

    let user = state
        .store
        .insert_user(NewUser {
            username: body.username,
            email: body.email,
            password_hash,
        })
        .await?;
    info!("User created successfully: id={}", user.id);

    let token = state.tokens.issue(user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: UserSummary::from(&user),
        }),
    ))
}

/// Exchanges an email/password pair for a session token.
///
/// Unknown email and wrong password produce identical responses so the
/// error text cannot be used to enumerate accounts.
async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    const INVALID: ApiError = ApiError::Auth("Invalid credentials");

    let user = state
        .store
        .find_user_by_email(&body.email)
        .await?
        .ok_or(INVALID)?;

    if !password::verify_password(&body.password, &user.password_hash) {
        return Err(INVALID);
    }

    info!("Login successful: id={}", user.id);
    let token = state.tokens.issue(user.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserSummary::from(&user),
    }))
}
