//! Cadence Core
//!
//! Platform-agnostic domain types, traits, and error handling shared by the
//! Cadence crates.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaybackContext`, `HistoryEntry`, `User`, `Playlist`
//! - **Roles**: the closed `Role` set and its capability table
//! - **Collaborator Traits**: `Catalog`, `HistoryLog`
//! - **Error Handling**: unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{Capability, ContextKind, ContextRef, PlaybackContext, Role, TrackId};
//!
//! let context = PlaybackContext::new(
//!     ContextRef::new(ContextKind::Album, "album-1"),
//!     vec![TrackId::new("a"), TrackId::new("b")],
//! );
//! assert_eq!(context.position_of(&TrackId::new("b")), Some(1));
//!
//! assert!(Role::Artist.can(Capability::PublishTracks));
//! assert!(!Role::User.can(Capability::ManageUsers));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CadenceError, Result};
pub use traits::{Catalog, HistoryLog};

pub use types::{
    Capability, ContextKind, ContextRef, CreateTrack, HistoryEntry, NewHistoryEntry,
    PlaybackContext, Playlist, PlaylistId, PlaylistTrack, Role, Track, TrackId, User, UserId,
};
