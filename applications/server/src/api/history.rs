/// Play history API routes
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cadence_core::{
    ContextKind, ContextRef, HistoryEntry, NewHistoryEntry, TrackId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecordPlayRequest {
    pub track_id: TrackId,
    #[serde(default)]
    pub context_type: Option<ContextKind>,
    #[serde(default)]
    pub context_id: Option<String>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// POST /api/player/history
/// Append a play for the caller
pub async fn record_play(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<RecordPlayRequest>,
) -> Result<StatusCode> {
    let context = match (req.context_type, req.context_id) {
        (Some(kind), Some(id)) => Some(ContextRef::new(kind, id)),
        (None, None) => None,
        _ => {
            return Err(ServerError::BadRequest(
                "context_type and context_id must be given together".to_string(),
            ))
        }
    };

    // Unknown tracks are a 404 rather than a constraint failure
    app_state.catalog.track(&req.track_id).await?;

    let entry = app_state
        .history
        .append(NewHistoryEntry {
            user_id: auth.user_id.clone(),
            track_id: req.track_id,
            context,
            played_at: req.played_at.unwrap_or_else(Utc::now),
        })
        .await?;

    tracing::debug!(entry_id = entry.id, user_id = %auth.user_id, "recorded play");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/player/history?limit=N
/// Caller's plays, newest first
pub async fn list_history(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let settings = app_state.player;
    let limit = query.limit.unwrap_or(settings.history_default_limit);
    if limit == 0 {
        return Err(ServerError::BadRequest("limit must be positive".to_string()));
    }
    let limit = limit.min(settings.history_max_limit);

    let entries = app_state.history.recent(auth.user_id(), limit).await?;
    Ok(Json(HistoryResponse { entries }))
}
