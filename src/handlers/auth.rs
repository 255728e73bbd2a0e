use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::identity::Profile;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

fn session_json(session: &crate::identity::Session) -> Value {
    json!({
        "success": true,
        "data": {
            "token": session.token,
            "user": session.user,
            "expires_in": session.expires_in
        }
    })
}

/// POST /auth/login - authenticate and receive a bearer token
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let session = state.identity.sign_in(&payload.email, &payload.password).await?;
    tracing::info!(email = %session.user.email, "user signed in");
    Ok(Json(session_json(&session)))
}

/// POST /auth/signup - register a user and open a session
pub async fn signup_post(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let session = state
        .identity
        .sign_up(&payload.email, &payload.password, payload.name.clone())
        .await?;

    // Seed the profile row so the topbar has a display name right away.
    state
        .profiles
        .upsert(Profile {
            user_id: session.user.id,
            email: session.user.email.clone(),
            full_name: payload.name,
        })
        .await?;

    tracing::info!(email = %session.user.email, "user registered");
    Ok((StatusCode::CREATED, Json(session_json(&session))))
}

/// DELETE /api/auth/session - sign out the current session
pub async fn session_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    state.identity.sign_out(&auth.token).await?;
    Ok(Json(json!({"success": true, "data": null})))
}

/// PUT /api/auth/password - update the current user's password
pub async fn password_put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<PasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.password.is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    state.identity.update_password(&auth.token, &payload.password).await?;
    tracing::info!(email = %auth.email, "password updated");
    Ok(Json(json!({"success": true, "data": null})))
}
