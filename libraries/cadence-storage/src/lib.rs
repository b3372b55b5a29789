//! Cadence Storage
//!
//! `SQLite` persistence for the Cadence catalog and play history.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature (`users`, `tracks`, `playlists`,
//!   `history`, `contexts`) owns its own queries as free functions over a pool
//! - **Collaborators**: [`Database`] implements the `Catalog` and `HistoryLog`
//!   traits from `cadence-core` on top of those slices
//! - **Append-only history**: enforced by triggers in the schema
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::{Catalog, ContextKind, ContextRef};
//! use cadence_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://cadence.db").await?;
//! let context = db.context(&ContextRef::new(ContextKind::Album, "album-1")).await?;
//! println!("{} tracks", context.len());
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

// Vertical slices
pub mod contexts;
pub mod history;
pub mod playlists;
pub mod tracks;
pub mod users;

pub use database::Database;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://cadence.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect_with(options)
        .await?;

    Ok(pool)
}
