//! Resolve a context reference to its ordered track list
//!
//! Album order: track number (unnumbered last), then title.
//! Artist order: album name (singles last), then album order.
//! Playlist order: stored position.

use crate::error::{Result, StorageError};
use cadence_core::{ContextKind, ContextRef, PlaybackContext, TrackId};
use sqlx::SqlitePool;

/// Load the current snapshot of a context
///
/// Albums and artists with no tracks yield an empty context; an unknown
/// playlist is `NotFound` since playlists exist independently of their entries.
pub async fn load(pool: &SqlitePool, source: &ContextRef) -> Result<PlaybackContext> {
    let tracks: Vec<TrackId> = match source.kind {
        ContextKind::Album => {
            sqlx::query_scalar(
                r#"
                SELECT id FROM tracks
                WHERE album_id = ?
                ORDER BY track_number IS NULL, track_number, title, id
                "#,
            )
            .bind(&source.id)
            .fetch_all(pool)
            .await?
        }
        ContextKind::Artist => {
            sqlx::query_scalar(
                r#"
                SELECT id FROM tracks
                WHERE artist_id = ?
                ORDER BY album IS NULL, album, album_id,
                         track_number IS NULL, track_number, title, id
                "#,
            )
            .bind(&source.id)
            .fetch_all(pool)
            .await?
        }
        ContextKind::Playlist => load_playlist(pool, &source.id).await?,
    };

    Ok(PlaybackContext::new(source.clone(), tracks))
}

async fn load_playlist(pool: &SqlitePool, playlist_id: &str) -> Result<Vec<TrackId>> {
    // Existence check and entries read from the same snapshot
    let mut tx = pool.begin().await?;

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_one(&mut *tx)
        .await?;
    if exists == 0 {
        return Err(StorageError::not_found("Playlist", playlist_id));
    }

    let tracks = sqlx::query_scalar(
        "SELECT track_id FROM playlist_tracks WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(tracks)
}
