//! Core types for queue resolution

use cadence_core::{PlaybackContext, TrackId};
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the ordering is exhausted
    #[default]
    #[serde(rename = "none", alias = "off")]
    Off,

    /// Loop the current track only
    One,

    /// Loop the whole ordering
    All,
}

impl RepeatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "none",
            Self::One => "one",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-held playback state
///
/// The resolver never stores this; every call receives the full state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Track currently playing
    pub current_track_id: TrackId,

    /// Index of the current occurrence in the context.
    /// Needed only when the track appears more than once.
    pub current_position: Option<usize>,

    /// Context snapshot for this session
    pub context: PlaybackContext,

    pub is_shuffling: bool,
    pub repeat_mode: RepeatMode,

    /// Seed of the shuffle permutation (ignored when not shuffling)
    pub shuffle_seed: u64,

    /// Draw a new permutation when repeat-all wraps while shuffling
    pub reshuffle_on_wrap: bool,
}

impl PlaybackState {
    /// State positioned on `current_track_id`, natural order, no repeat
    pub fn new(context: PlaybackContext, current_track_id: TrackId) -> Self {
        Self {
            current_track_id,
            current_position: None,
            context,
            is_shuffling: false,
            repeat_mode: RepeatMode::Off,
            shuffle_seed: 0,
            reshuffle_on_wrap: false,
        }
    }

    /// Enable shuffling with the given seed
    #[must_use]
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.is_shuffling = true;
        self.shuffle_seed = seed;
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat_mode: RepeatMode) -> Self {
        self.repeat_mode = repeat_mode;
        self
    }

    /// Pin the current occurrence to `position`
    #[must_use]
    pub fn at_position(mut self, position: usize) -> Self {
        self.current_position = Some(position);
        self
    }

    #[must_use]
    pub fn reshuffle_on_wrap(mut self, reshuffle: bool) -> Self {
        self.reshuffle_on_wrap = reshuffle;
        self
    }

    /// State after the client starts playing `track`
    #[must_use]
    pub fn follow(&self, track: &TrackRef) -> Self {
        Self {
            current_track_id: track.track_id.clone(),
            current_position: Some(track.position),
            shuffle_seed: track.shuffle_seed,
            ..self.clone()
        }
    }
}

/// A resolved track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub track_id: TrackId,

    /// Index of this occurrence in the context
    pub position: usize,

    /// Seed the client must send on its next call.
    /// Differs from the input seed only after a reshuffling wrap.
    pub shuffle_seed: u64,

    /// Produced by a repeat-all wrap
    pub wrapped: bool,
}

/// Outcome of a next/previous resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Play this track
    Track(TrackRef),

    /// No successor under a non-wrapping repeat mode
    EndOfQueue,

    /// No predecessor under a non-wrapping repeat mode
    StartOfQueue,
}

impl Resolution {
    /// Resolved track, if any
    pub fn track(&self) -> Option<&TrackRef> {
        match self {
            Resolution::Track(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_track(self) -> Option<TrackRef> {
        match self {
            Resolution::Track(track) => Some(track),
            _ => None,
        }
    }

    /// Whether traversal hit a boundary
    pub fn is_exhausted(&self) -> bool {
        !matches!(self, Resolution::Track(_))
    }
}
