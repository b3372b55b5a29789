//! Append-only play history
//!
//! There is deliberately no update or delete here; the schema rejects both.

use crate::error::{timestamp, Result, StorageError};
use cadence_core::{ContextKind, ContextRef, HistoryEntry, NewHistoryEntry, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn entry_from_row(row: &SqliteRow) -> Result<HistoryEntry> {
    let context_type: Option<String> = row.try_get("context_type")?;
    let context_id: Option<String> = row.try_get("context_id")?;

    let context = match (context_type, context_id) {
        (Some(kind), Some(id)) => {
            let kind = ContextKind::from_str(&kind)
                .ok_or_else(|| StorageError::InvalidData(format!("context type {kind}")))?;
            Some(ContextRef::new(kind, id))
        }
        _ => None,
    };

    Ok(HistoryEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        track_id: row.try_get("track_id")?,
        context,
        played_at: timestamp(row.try_get("played_at")?)?,
    })
}

/// Append a play
pub async fn append(pool: &SqlitePool, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
    let (context_type, context_id) = match &entry.context {
        Some(context) => (Some(context.kind.as_str()), Some(context.id.as_str())),
        None => (None, None),
    };

    let result = sqlx::query(
        "INSERT INTO play_history (user_id, track_id, context_type, context_id, played_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&entry.user_id)
    .bind(&entry.track_id)
    .bind(context_type)
    .bind(context_id)
    .bind(entry.played_at.timestamp())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let row = sqlx::query(
        "SELECT id, user_id, track_id, context_type, context_id, played_at
         FROM play_history WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    entry_from_row(&row)
}

/// Most recent plays for a user, newest first
pub async fn recent(pool: &SqlitePool, user_id: &UserId, limit: u32) -> Result<Vec<HistoryEntry>> {
    let rows = sqlx::query(
        "SELECT id, user_id, track_id, context_type, context_id, played_at
         FROM play_history
         WHERE user_id = ?
         ORDER BY played_at DESC, id DESC
         LIMIT ?",
    )
    .bind(user_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}
