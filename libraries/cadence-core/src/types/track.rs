//! Catalog track type

use super::ids::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog track
///
/// Tracks are owned by the catalog. Playback state only ever refers to them
/// by [`TrackId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,
    /// Track title
    pub title: String,

    /// Artist identifier, also the id of the artist playback context
    pub artist_id: String,
    /// Artist display name
    pub artist: String,

    /// Album identifier, also the id of the album playback context
    pub album_id: Option<String>,
    /// Album title
    pub album: Option<String>,

    /// Position on the album (1-based)
    pub track_number: Option<u32>,

    /// Duration in milliseconds
    pub duration_ms: u64,
    /// When the track was added to the catalog
    pub created_at: DateTime<Utc>,
}

/// Data for adding a track to the catalog
///
/// Fields mirror [`Track`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CreateTrack {
    /// Explicit id (generated when absent)
    #[serde(default)]
    pub id: Option<TrackId>,
    pub title: String,
    pub artist_id: String,
    pub artist: String,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    pub duration_ms: u64,
}

impl CreateTrack {
    /// Validate user-supplied fields
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::CadenceError::invalid_input("track title is empty"));
        }
        if self.artist_id.trim().is_empty() {
            return Err(crate::CadenceError::invalid_input("artist_id is empty"));
        }
        if self.track_number == Some(0) {
            return Err(crate::CadenceError::invalid_input(
                "track_number starts at 1",
            ));
        }
        if self.album_id.is_none() && self.album.is_some() {
            return Err(crate::CadenceError::invalid_input(
                "album name given without album_id",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(title: &str) -> CreateTrack {
        CreateTrack {
            id: None,
            title: title.to_string(),
            artist_id: "artist-1".to_string(),
            artist: "Artist".to_string(),
            album_id: None,
            album: None,
            track_number: None,
            duration_ms: 180_000,
        }
    }

    #[test]
    fn rejects_blank_title() {
        assert!(create("   ").validate().is_err());
        assert!(create("Song").validate().is_ok());
    }

    #[test]
    fn rejects_album_name_without_id() {
        let mut track = create("Song");
        track.album = Some("Album".to_string());
        assert!(track.validate().is_err());
    }
}
