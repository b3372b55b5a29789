/// Admin API routes
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use cadence_core::{Role, User};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// POST /api/admin/users
/// Create a new user account
pub async fn create_user(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ServerError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user =
        cadence_storage::users::create(app_state.db.pool(), username, req.role, &password_hash)
            .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/admin/users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = cadence_storage::users::get_all(app_state.db.pool()).await?;
    Ok(Json(users))
}
