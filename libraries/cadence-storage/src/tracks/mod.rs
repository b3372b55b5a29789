//! Track catalog queries

use crate::error::{timestamp, Result, StorageError};
use cadence_core::{CreateTrack, Track, TrackId};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Acquire, Executor, Row, Sqlite};

const TRACK_COLUMNS: &str =
    "id, title, artist_id, artist, album_id, album, track_number, duration_ms, created_at";

fn track_from_row(row: &SqliteRow) -> Result<Track> {
    let track_number: Option<i64> = row.try_get("track_number")?;
    let duration_ms: i64 = row.try_get("duration_ms")?;

    Ok(Track {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist_id: row.try_get("artist_id")?,
        artist: row.try_get("artist")?,
        album_id: row.try_get("album_id")?,
        album: row.try_get("album")?,
        track_number: track_number
            .map(|n| u32::try_from(n).map_err(|_| StorageError::InvalidData(format!("track_number {n}"))))
            .transpose()?,
        duration_ms: u64::try_from(duration_ms)
            .map_err(|_| StorageError::InvalidData(format!("duration_ms {duration_ms}")))?,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

/// Add a track to the catalog
///
/// # Errors
///
/// Returns `Duplicate` if a track with the same explicit id exists
pub async fn create<'a, A>(conn: A, track: &CreateTrack) -> Result<Track>
where
    A: Acquire<'a, Database = Sqlite>,
{
    let mut conn = conn.acquire().await?;
    let id = track.id.clone().unwrap_or_else(TrackId::generate);
    let duration_ms = i64::try_from(track.duration_ms)
        .map_err(|_| StorageError::InvalidData(format!("duration_ms {}", track.duration_ms)))?;

    sqlx::query(
        "INSERT INTO tracks (id, title, artist_id, artist, album_id, album, track_number, duration_ms, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&track.title)
    .bind(&track.artist_id)
    .bind(&track.artist)
    .bind(&track.album_id)
    .bind(&track.album)
    .bind(track.track_number.map(i64::from))
    .bind(duration_ms)
    .bind(Utc::now().timestamp())
    .execute(&mut *conn)
    .await
    .map_err(|e| StorageError::from_insert(e, format!("track '{id}'")))?;

    get(&mut *conn, &id)
        .await?
        .ok_or_else(|| StorageError::not_found("Track", id.as_str()))
}

/// Get a track by ID
pub async fn get<'e, E>(executor: E, id: &TrackId) -> Result<Option<Track>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(track_from_row).transpose()
}

/// Check whether a track exists
pub async fn exists<'e, E>(executor: E, id: &TrackId) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}
