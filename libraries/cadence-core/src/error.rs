//! Core error types for Cadence

use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type shared by the catalog and history collaborators
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity, e.g. "Track"
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Backing store could not be reached (transient)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CadenceError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CadenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Row", "unknown"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Storage(other.to_string()),
        }
    }
}
