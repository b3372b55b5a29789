/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Stored value could not be mapped to a domain type
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Map a unique-constraint violation to `Duplicate`, pass anything else through
    pub(crate) fn from_insert(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Duplicate(what.into())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for cadence_core::CadenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::not_found(entity, id),
            StorageError::Duplicate(what) => Self::Duplicate(what),
            StorageError::Database(e) => e.into(),
            other => Self::storage(other.to_string()),
        }
    }
}

/// Convert unix seconds to a UTC timestamp
pub(crate) fn timestamp(secs: i64) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StorageError::InvalidData(format!("invalid timestamp: {secs}")))
}
