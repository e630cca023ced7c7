//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::auth::models::{LoginForm, MessageResponse, RegisterRequest, TokenResponse};
use crate::auth::password::{hash_password, verify_password};
use crate::core::error::{BoardError, Result};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};

/// Uniform login failure. An unknown username and a wrong password must be
/// indistinguishable to the client.
fn invalid_credentials() -> BoardError {
    BoardError::AuthenticationError("Invalid credentials".to_string())
}

/// Handler for POST /api/auth/register - User registration
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(username = %req.username, "User registration attempt");

    let password_hash = hash_password(&req.password)?;
    let user = state.user_repo.create(&req.username, &password_hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered successfully");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Handler for POST /token - Login, issuing an access token
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    tracing::info!(username = %form.username, "Login attempt");

    let user = state
        .user_repo
        .find_by_username(&form.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&form.password, &user.password_hash) {
        tracing::debug!(username = %form.username, "Password verification failed");
        return Err(invalid_credentials());
    }

    if !user.is_active {
        tracing::debug!(username = %form.username, "Deactivated user denied login");
        return Err(invalid_credentials());
    }

    let access_token = state.tokens.issue(&user.username)?;

    tracing::info!(user_id = user.id, username = %user.username, "Login successful");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
