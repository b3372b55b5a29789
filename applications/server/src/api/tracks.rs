/// Tracks API routes
use crate::{
    error::Result, extract::ApiJson, middleware::AuthenticatedUser, state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cadence_core::{CreateTrack, Track, TrackId};

/// GET /api/tracks/:id
pub async fn get_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Track>> {
    let track = app_state.catalog.track(&TrackId::new(id)).await?;
    Ok(Json(track))
}

/// POST /api/tracks
/// Add a track to the catalog
pub async fn publish_track(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<CreateTrack>,
) -> Result<(StatusCode, Json<Track>)> {
    req.validate()?;

    let track = cadence_storage::tracks::create(app_state.db.pool(), &req).await?;
    tracing::info!(track_id = %track.id, publisher = %auth.user_id, "track published");

    Ok((StatusCode::CREATED, Json(track)))
}
