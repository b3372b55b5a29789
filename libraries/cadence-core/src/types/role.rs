//! Roles and the capability table
//!
//! Roles form a closed set. What a role may do is decided by a single static
//! table, consulted once at the authorization boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Listener: playback, history and own playlists
    #[default]
    User,
    /// Listener who may also publish tracks
    Artist,
    /// Everything, including account management
    Admin,
}

/// An operation gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Resolve next/previous tracks and preview the queue
    ControlPlayback,
    /// Append to the caller's play history
    RecordHistory,
    /// Read the caller's play history
    ViewHistory,
    /// Create and edit own playlists
    ManagePlaylists,
    /// Add tracks to the catalog
    PublishTracks,
    /// Create and list accounts
    ManageUsers,
}

const USER_CAPABILITIES: &[Capability] = &[
    Capability::ControlPlayback,
    Capability::RecordHistory,
    Capability::ViewHistory,
    Capability::ManagePlaylists,
];

const ARTIST_CAPABILITIES: &[Capability] = &[
    Capability::ControlPlayback,
    Capability::RecordHistory,
    Capability::ViewHistory,
    Capability::ManagePlaylists,
    Capability::PublishTracks,
];

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ControlPlayback,
    Capability::RecordHistory,
    Capability::ViewHistory,
    Capability::ManagePlaylists,
    Capability::PublishTracks,
    Capability::ManageUsers,
];

impl Role {
    /// Wire and storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Artist => "artist",
            Role::Admin => "admin",
        }
    }

    /// Parse a wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "artist" => Some(Role::Artist),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Capabilities granted to this role
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::User => USER_CAPABILITIES,
            Role::Artist => ARTIST_CAPABILITIES,
            Role::Admin => ADMIN_CAPABILITIES,
        }
    }

    /// Whether this role grants `capability`
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
