//! Playlist queries
//!
//! Entry positions are zero-based and stay contiguous: appends go to the
//! end, removals shift later entries down by one.

use crate::error::{timestamp, Result, StorageError};
use cadence_core::{Playlist, PlaylistId, PlaylistTrack, TrackId, UserId};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Acquire, Executor, Row, Sqlite, SqlitePool};

fn playlist_from_row(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        created_at: timestamp(row.try_get("created_at")?)?,
        tracks: None,
    })
}

fn position(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| StorageError::InvalidData(format!("position {value}")))
}

/// Create an empty playlist
pub async fn create<'e, E>(executor: E, owner_id: &UserId, name: &str) -> Result<Playlist>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = PlaylistId::generate();
    let now = Utc::now().timestamp();

    sqlx::query("INSERT INTO playlists (id, owner_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(owner_id)
        .bind(name)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(Playlist {
        id,
        owner_id: owner_id.clone(),
        name: name.to_string(),
        created_at: timestamp(now)?,
        tracks: Some(Vec::new()),
    })
}

/// Get a playlist with its entries
pub async fn get(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, owner_id, name, created_at FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut playlist = playlist_from_row(&row)?;

    let rows = sqlx::query(
        r#"
        SELECT position, track_id FROM playlist_tracks
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let tracks = rows
        .iter()
        .map(|row| {
            Ok(PlaylistTrack {
                position: position(row.try_get("position")?)?,
                track_id: row.try_get("track_id")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    playlist.tracks = Some(tracks);
    Ok(Some(playlist))
}

/// Playlists owned by a user, without entries
pub async fn get_by_owner(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM playlists WHERE owner_id = ? ORDER BY created_at, name",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(playlist_from_row).collect()
}

/// First playlist `owner_id` created under `name`, without entries
pub async fn find_by_name<'e, E>(executor: E, owner_id: &UserId, name: &str) -> Result<Option<Playlist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM playlists
         WHERE owner_id = ? AND name = ?
         ORDER BY created_at, id
         LIMIT 1",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(playlist_from_row).transpose()
}

/// Append a track, returning its position
///
/// # Errors
///
/// Returns `NotFound` if the playlist or the track does not exist
pub async fn add_track<'a, A>(conn: A, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<u32>
where
    A: Acquire<'a, Database = Sqlite>,
{
    let mut tx = conn.begin().await?;

    let playlist: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_one(&mut *tx)
        .await?;
    if playlist == 0 {
        return Err(StorageError::not_found("Playlist", playlist_id.as_str()));
    }

    let track: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks WHERE id = ?")
        .bind(track_id)
        .fetch_one(&mut *tx)
        .await?;
    if track == 0 {
        return Err(StorageError::not_found("Track", track_id.as_str()));
    }

    let next: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO playlist_tracks (playlist_id, position, track_id) VALUES (?, ?, ?)")
        .bind(playlist_id)
        .bind(next)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    position(next)
}

/// Remove the entry at `position`, closing the gap
///
/// # Errors
///
/// Returns `NotFound` if there is no entry at that position
pub async fn remove_at_position(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    position: u32,
) -> Result<()> {
    let mut tx = pool.begin().await?;
    let position = i64::from(position);

    let removed = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND position = ?")
        .bind(playlist_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;
    if removed.rows_affected() == 0 {
        return Err(StorageError::not_found(
            "Playlist entry",
            format!("{playlist_id}#{position}"),
        ));
    }

    // Two passes so no intermediate row collides with the primary key
    sqlx::query(
        "UPDATE playlist_tracks SET position = -position WHERE playlist_id = ? AND position > ?",
    )
    .bind(playlist_id)
    .bind(position)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE playlist_tracks SET position = -position - 1 WHERE playlist_id = ? AND position < 0",
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a playlist and its entries
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id.as_str()));
    }
    Ok(())
}
