/// Queue resolver API routes
///
/// Every call carries the full client-held playback state. The handler
/// fetches a context snapshot, resolves, and returns; nothing about the
/// session is stored server-side.
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cadence_core::{Catalog, ContextKind, ContextRef, Track, TrackId};
use cadence_playback::{
    fresh_seed, resolve_next, resolve_previous, upcoming, PlaybackState, RepeatMode, Resolution,
    TrackRef,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRequest {
    pub current_track_id: TrackId,
    #[serde(default)]
    pub current_position: Option<usize>,
    pub context_type: ContextKind,
    pub context_id: String,
    #[serde(default)]
    pub is_shuffling: bool,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
    /// Absent on the first shuffled call; the server then draws one
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    #[serde(default)]
    pub reshuffle_on_wrap: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    #[serde(flatten)]
    pub state: PlayerRequest,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedTrackResponse {
    pub track: Track,
    pub position: usize,
    pub shuffle_seed: u64,
    pub wrapped: bool,
}

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub shuffle_seed: u64,
    pub tracks: Vec<TrackRef>,
}

impl PlayerRequest {
    /// Build the resolver state from a fresh context snapshot
    async fn into_state(self, catalog: &dyn Catalog) -> Result<PlaybackState> {
        let source = ContextRef::new(self.context_type, self.context_id);
        let context = catalog.context(&source).await?;

        let shuffle_seed = match self.shuffle_seed {
            Some(seed) => seed,
            None if self.is_shuffling => fresh_seed(),
            None => 0,
        };

        Ok(PlaybackState {
            current_track_id: self.current_track_id,
            current_position: self.current_position,
            context,
            is_shuffling: self.is_shuffling,
            repeat_mode: self.repeat_mode,
            shuffle_seed,
            reshuffle_on_wrap: self.reshuffle_on_wrap,
        })
    }
}

/// POST /api/player/next
pub async fn next(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PlayerRequest>,
) -> Result<Response> {
    let state = req.into_state(app_state.catalog.as_ref()).await?;
    let resolution = resolve_next(&state)?;
    respond(&app_state, resolution).await
}

/// POST /api/player/previous
pub async fn previous(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PlayerRequest>,
) -> Result<Response> {
    let state = req.into_state(app_state.catalog.as_ref()).await?;
    let resolution = resolve_previous(&state)?;
    respond(&app_state, resolution).await
}

/// POST /api/player/queue
/// Preview the tracks `next` would return, in order
pub async fn queue(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<QueueRequest>,
) -> Result<Json<QueueResponse>> {
    let max = app_state.player.queue_preview_limit;
    let limit = req.limit.unwrap_or(max);
    if limit == 0 || limit > max {
        return Err(ServerError::BadRequest(format!(
            "limit must be between 1 and {max}"
        )));
    }

    let state = req.state.into_state(app_state.catalog.as_ref()).await?;
    let tracks = upcoming(&state, limit)?;

    Ok(Json(QueueResponse {
        shuffle_seed: state.shuffle_seed,
        tracks,
    }))
}

async fn respond(app_state: &AppState, resolution: Resolution) -> Result<Response> {
    let Resolution::Track(resolved) = resolution else {
        // EndOfQueue and StartOfQueue are outcomes, not errors
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let track = app_state.catalog.track(&resolved.track_id).await?;
    tracing::debug!(
        track_id = %resolved.track_id,
        position = resolved.position,
        wrapped = resolved.wrapped,
        "resolved track"
    );

    Ok(Json(ResolvedTrackResponse {
        track,
        position: resolved.position,
        shuffle_seed: resolved.shuffle_seed,
        wrapped: resolved.wrapped,
    })
    .into_response())
}
