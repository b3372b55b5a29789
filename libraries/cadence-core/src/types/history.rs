//! Play history entries

use super::context::ContextRef;
use super::ids::{TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded play
///
/// Write-once: entries are appended and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Row id, increasing in insertion order
    pub id: i64,
    /// Listener
    pub user_id: UserId,
    /// Track that was played
    pub track_id: TrackId,

    /// Context the track was played from, if known
    pub context: Option<ContextRef>,
    /// When playback started
    pub played_at: DateTime<Utc>,
}

/// Data for appending a history entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewHistoryEntry {
    pub user_id: UserId,
    pub track_id: TrackId,
    pub context: Option<ContextRef>,
    pub played_at: DateTime<Utc>,
}
