//! Collaborator traits
//!
//! The playback resolver never performs I/O. These traits describe the two
//! collaborators the HTTP boundary consults around it: the catalog that
//! supplies context snapshots, and the append-only play history.

use crate::error::Result;
use crate::types::{ContextRef, HistoryEntry, NewHistoryEntry, PlaybackContext, Track, TrackId, UserId};
use async_trait::async_trait;

/// Source of playback contexts and track metadata
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Snapshot of the context identified by `source`
    ///
    /// Fails with `NotFound` for a playlist that does not exist. Album and
    /// artist contexts are derived from track membership, so an unknown album
    /// or artist yields an empty context rather than an error.
    async fn context(&self, source: &ContextRef) -> Result<PlaybackContext>;

    /// Track metadata by id
    async fn track(&self, id: &TrackId) -> Result<Track>;
}

/// Append-only log of plays
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Append an entry and return it with its assigned id
    async fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry>;

    /// Most recent entries for `user_id`, newest first
    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<HistoryEntry>>;
}
