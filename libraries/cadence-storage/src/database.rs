/// Database handle implementing the catalog and history collaborators
use crate::{contexts, history, tracks};
use async_trait::async_trait;
use cadence_core::{
    CadenceError, Catalog, ContextRef, HistoryEntry, HistoryLog, NewHistoryEntry,
    PlaybackContext, Track, TrackId, UserId,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// `SQLite`-backed catalog and history
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// # Errors
    /// Returns an error if the connection or migrations fail
    pub async fn connect(database_url: &str) -> crate::Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing, migrated pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> crate::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Start a transaction for work spanning several slice calls
    ///
    /// Dropping it without `commit` rolls everything back.
    pub async fn begin(&self) -> crate::Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Underlying pool for the vertical-slice functions
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for Database {
    async fn context(&self, source: &ContextRef) -> cadence_core::Result<PlaybackContext> {
        Ok(contexts::load(&self.pool, source).await?)
    }

    async fn track(&self, id: &TrackId) -> cadence_core::Result<Track> {
        tracks::get(&self.pool, id)
            .await?
            .ok_or_else(|| CadenceError::not_found("Track", id.as_str()))
    }
}

#[async_trait]
impl HistoryLog for Database {
    async fn append(&self, entry: NewHistoryEntry) -> cadence_core::Result<HistoryEntry> {
        Ok(history::append(&self.pool, &entry).await?)
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> cadence_core::Result<Vec<HistoryEntry>> {
        Ok(history::recent(&self.pool, user_id, limit).await?)
    }
}
