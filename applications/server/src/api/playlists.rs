/// Playlist API routes
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cadence_core::{CadenceError, Playlist, PlaylistId, Role, TrackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTrackRequest {
    pub track_id: TrackId,
}

#[derive(Debug, Serialize)]
pub struct AddTrackResponse {
    pub position: u32,
}

/// GET /api/playlists
/// Caller's own playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = cadence_storage::playlists::get_by_owner(app_state.db.pool(), auth.user_id()).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("Playlist name is empty".to_string()));
    }

    let playlist = cadence_storage::playlists::create(app_state.db.pool(), auth.user_id(), name).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:id
/// Any authenticated user may read a playlist; playlists are playable contexts.
pub async fn get_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Playlist>> {
    let playlist = load(&app_state, &PlaylistId::new(id)).await?;
    Ok(Json(playlist))
}

/// POST /api/playlists/:id/tracks
pub async fn add_track(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AddTrackRequest>,
) -> Result<(StatusCode, Json<AddTrackResponse>)> {
    let playlist = load(&app_state, &PlaylistId::new(id)).await?;
    ensure_can_edit(&auth, &playlist)?;

    let position =
        cadence_storage::playlists::add_track(app_state.db.pool(), &playlist.id, &req.track_id).await?;
    Ok((StatusCode::CREATED, Json(AddTrackResponse { position })))
}

/// DELETE /api/playlists/:id/tracks/:position
pub async fn remove_track(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Path((id, position)): Path<(String, u32)>,
) -> Result<StatusCode> {
    let playlist = load(&app_state, &PlaylistId::new(id)).await?;
    ensure_can_edit(&auth, &playlist)?;

    cadence_storage::playlists::remove_at_position(app_state.db.pool(), &playlist.id, position).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load(app_state: &AppState, id: &PlaylistId) -> Result<Playlist> {
    cadence_storage::playlists::get(app_state.db.pool(), id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Playlist not found: {id}")))
}

/// Owners edit their playlists; admins edit any
fn ensure_can_edit(auth: &AuthenticatedUser, playlist: &Playlist) -> Result<()> {
    if playlist.owner_id == auth.user_id || auth.role == Role::Admin {
        Ok(())
    } else {
        Err(CadenceError::permission_denied("only the owner may edit this playlist").into())
    }
}
