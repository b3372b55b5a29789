//! Playlist types

use super::ids::{PlaylistId, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-owned playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,
    /// User who may edit it (besides admins)
    pub owner_id: UserId,
    /// Display name, not unique
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Entries in playlist order (populated when requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<PlaylistTrack>>,
}

/// One entry of a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    /// Zero-based position, contiguous within the playlist
    pub position: u32,
    /// Track at this position
    pub track_id: TrackId,
}
