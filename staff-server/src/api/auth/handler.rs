//! Authentication Handlers
//!
//! Handles login, registration, logout and token management

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{Identity, LoginRequest, LoginResponse, RegisterRequest};
use shared::error::AuthError;

use crate::auth::{self, CurrentUser, LoginError};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::require_fields;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn issue_token(state: &ServerState, identity: Identity) -> AppResult<LoginResponse> {
    let (token, expires_at) = state
        .get_jwt_service()
        .generate_token(&identity)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;
    Ok(LoginResponse {
        token,
        user: identity,
        expires_at,
    })
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token with the sanitized identity
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    require_fields(&[
        ("email", req.email.as_str()),
        ("password", req.password.as_str()),
    ])?;

    let result = auth::authenticate(state.pool(), &req.email, &req.password).await;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let identity = match result {
        Ok(identity) => identity,
        Err(LoginError::Auth(AuthError::NotFound)) => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "user_not_found");
            return Err(AuthError::NotFound.into());
        }
        Err(LoginError::Auth(AuthError::InvalidCredentials)) => {
            tracing::warn!(email = %req.email, "Login failed - invalid credentials");
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "invalid_credentials");
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        user_id = identity.id,
        email = %identity.email,
        role = %identity.role,
        "User logged in successfully"
    );

    Ok(ok(issue_token(&state, identity)?))
}

/// Register a new employee-role account and log it in
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let identity = auth::register(state.pool(), &req).await?;
    tracing::info!(user_id = identity.id, email = %identity.email, "Account registered");
    Ok(ok(issue_token(&state, identity)?))
}

/// Get current user info (fresh from the database)
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Identity>>> {
    let account = user::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    Ok(ok(account.identity()))
}

/// Logout handler
///
/// Tokens are stateless; this only records the event.
pub async fn logout(user: CurrentUser) -> Json<ApiResponse<()>> {
    tracing::info!(user_id = user.id, email = %user.email, "User logged out");
    Json(ApiResponse::ok())
}
