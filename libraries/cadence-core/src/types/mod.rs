//! Domain types

mod context;
mod history;
mod ids;
mod playlist;
mod role;
mod track;
mod user;

pub use context::{ContextKind, ContextRef, PlaybackContext};
pub use history::{HistoryEntry, NewHistoryEntry};
pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::{Playlist, PlaylistTrack};
pub use role::{Capability, Role};
pub use track::{CreateTrack, Track};
pub use user::User;
