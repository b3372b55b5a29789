//! Playback contexts: the ordered track sequences a session draws from

use super::ids::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of playback context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// User playlist, in playlist order
    Playlist,
    /// Album tracks by track number
    Album,
    /// Every track by an artist, grouped by album
    Artist,
}

impl ContextKind {
    /// Wire and storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Playlist => "playlist",
            ContextKind::Album => "album",
            ContextKind::Artist => "artist",
        }
    }

    /// Parse a wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "playlist" => Some(ContextKind::Playlist),
            "album" => Some(ContextKind::Album),
            "artist" => Some(ContextKind::Artist),
            _ => None,
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a context by kind and id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextRef {
    /// What kind of context `id` names
    pub kind: ContextKind,
    /// Playlist, album or artist id
    pub id: String,
}

impl ContextRef {
    /// Create a context reference
    pub fn new(kind: ContextKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Snapshot of a playback context
///
/// Immutable for the duration of a playback session: later edits to the
/// underlying playlist produce a new snapshot, they never reorder this one.
/// The same track may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackContext {
    /// Context the snapshot was taken from
    pub source: ContextRef,
    tracks: Vec<TrackId>,
}

impl PlaybackContext {
    /// Snapshot `tracks` in natural order
    pub fn new(source: ContextRef, tracks: Vec<TrackId>) -> Self {
        Self { source, tracks }
    }

    /// Context kind
    pub fn kind(&self) -> ContextKind {
        self.source.kind
    }

    /// Ordered track references
    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    /// Track at `index` in natural order
    pub fn get(&self, index: usize) -> Option<&TrackId> {
        self.tracks.get(index)
    }

    /// Number of entries, counting repeats
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the context has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the first occurrence of `track_id`
    pub fn position_of(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t == track_id)
    }
}
