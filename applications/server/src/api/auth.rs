/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

fn invalid_credentials() -> ServerError {
    ServerError::Auth("Invalid username or password".to_string())
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, password_hash) =
        cadence_storage::users::get_credentials(app_state.db.pool(), &req.username)
            .await?
            .ok_or_else(invalid_credentials)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid_credentials());
    }

    let tokens = app_state.auth_service.issue(&user)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
/// Issues a new access token carrying the user's current role
pub async fn refresh(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let user = cadence_storage::users::get_by_id(app_state.db.pool(), &user_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown user".to_string()))?;

    let access_token = app_state.auth_service.create_access_token(&user.id, user.role)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
