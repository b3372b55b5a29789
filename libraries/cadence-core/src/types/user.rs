//! User domain type

use super::ids::UserId;
use super::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login and display name (unique)
    pub name: String,

    /// Decides which capabilities the account has
    pub role: Role,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            role,
            created_at: Utc::now(),
        }
    }
}
