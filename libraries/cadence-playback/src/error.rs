//! Error types for queue resolution

use cadence_core::TrackId;
use thiserror::Error;

/// Resolution errors
///
/// Both variants are caller errors: the input state cannot be resolved and
/// retrying with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The playback context has no tracks
    #[error("Playback context is empty")]
    EmptyContext,

    /// The current track is not where the state claims it is
    #[error("Track {track_id} is not in the playback context{}", position_suffix(.position))]
    InvalidState {
        track_id: TrackId,
        position: Option<usize>,
    },
}

fn position_suffix(position: &Option<usize>) -> String {
    position
        .map(|p| format!(" at position {p}"))
        .unwrap_or_default()
}

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ResolveError>;
