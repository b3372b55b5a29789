//! Cadence Playback - Queue Resolution
//!
//! Platform-agnostic next/previous track resolution for Cadence.
//!
//! This crate provides:
//! - Next/previous resolution over a playback context
//! - Repeat modes (None, One, All)
//! - Seeded, reproducible shuffle permutations
//! - Upcoming-track previews
//!
//! # Architecture
//!
//! `cadence-playback` is a pure function library:
//! - No I/O, no storage, no clock
//! - No state kept between calls: the client holds the playback state and
//!   sends it with every request
//! - Safe to call concurrently from any number of tasks
//!
//! # Example: Next and Previous
//!
//! ```rust
//! use cadence_core::{ContextKind, ContextRef, PlaybackContext, TrackId};
//! use cadence_playback::{resolve_next, resolve_previous, PlaybackState, RepeatMode, Resolution};
//!
//! let context = PlaybackContext::new(
//!     ContextRef::new(ContextKind::Playlist, "road-trip"),
//!     vec![TrackId::new("A"), TrackId::new("B"), TrackId::new("C")],
//! );
//!
//! let state = PlaybackState::new(context, TrackId::new("C"));
//! assert_eq!(resolve_next(&state).unwrap(), Resolution::EndOfQueue);
//!
//! let state = state.with_repeat(RepeatMode::All);
//! let next = resolve_next(&state).unwrap().into_track().unwrap();
//! assert_eq!(next.track_id, TrackId::new("A"));
//!
//! let previous = resolve_previous(&state).unwrap().into_track().unwrap();
//! assert_eq!(previous.track_id, TrackId::new("B"));
//! ```
//!
//! # Example: Shuffle
//!
//! ```rust
//! use cadence_core::{ContextKind, ContextRef, PlaybackContext, TrackId};
//! use cadence_playback::{resolve_next, PlaybackState};
//!
//! let context = PlaybackContext::new(
//!     ContextRef::new(ContextKind::Album, "album-1"),
//!     (0..10).map(|i| TrackId::new(format!("t{i}"))).collect(),
//! );
//!
//! // Same seed, same traversal, across processes and restarts
//! let state = PlaybackState::new(context, TrackId::new("t0")).shuffled(42);
//! assert_eq!(resolve_next(&state).unwrap(), resolve_next(&state).unwrap());
//! ```

mod error;
mod order;
mod resolver;
mod shuffle;
pub mod types;

// Public exports
pub use error::{ResolveError, Result};
pub use resolver::{resolve_next, resolve_previous, upcoming};
pub use shuffle::{fresh_seed, next_seed, shuffle_order};
pub use types::{PlaybackState, RepeatMode, Resolution, TrackRef};
