/// Catalog seed import
///
/// Reads a JSON document of tracks and playlists and inserts it. Tracks whose
/// id already exists, and playlists whose owner already has one by that name,
/// are skipped so a seed file can be re-applied.
use crate::error::{Result, ServerError};
use cadence_core::{CadenceError, CreateTrack, TrackId};
use cadence_storage::{playlists, tracks, users, Database, StorageError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub tracks: Vec<CreateTrack>,
    #[serde(default)]
    pub playlists: Vec<PlaylistSeed>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSeed {
    pub name: String,
    /// Owner's user name
    pub owner: String,
    #[serde(default)]
    pub tracks: Vec<TrackId>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub tracks_added: usize,
    pub tracks_skipped: usize,
    pub playlists_added: usize,
    pub playlists_skipped: usize,
}

impl CatalogFile {
    /// Parse a seed file from disk
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServerError::BadRequest(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&contents).map_err(|e| CadenceError::from(e).into())
    }
}

/// Insert everything in `file` in one transaction
///
/// Stops at the first invalid track, unknown playlist owner or unknown
/// playlist entry; nothing from a failed import is kept.
pub async fn import_catalog(db: &Database, file: &CatalogFile) -> Result<ImportSummary> {
    let mut tx = db.begin().await?;
    let mut summary = ImportSummary::default();

    for track in &file.tracks {
        track.validate()?;
        if let Some(id) = &track.id {
            if tracks::exists(&mut *tx, id).await? {
                tracing::debug!(track_id = %id, "skipping existing track");
                summary.tracks_skipped += 1;
                continue;
            }
        }
        let created = tracks::create(&mut *tx, track).await?;
        tracing::debug!(track_id = %created.id, "imported track");
        summary.tracks_added += 1;
    }

    for seed in &file.playlists {
        let owner = users::get_by_name(&mut *tx, &seed.owner)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("playlist owner '{}'", seed.owner)))?;

        if playlists::find_by_name(&mut *tx, &owner.id, &seed.name).await?.is_some() {
            tracing::debug!(owner = %seed.owner, playlist = %seed.name, "skipping existing playlist");
            summary.playlists_skipped += 1;
            continue;
        }

        let playlist = playlists::create(&mut *tx, &owner.id, &seed.name).await?;
        for track_id in &seed.tracks {
            playlists::add_track(&mut *tx, &playlist.id, track_id).await?;
        }
        summary.playlists_added += 1;
    }

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(
        tracks_added = summary.tracks_added,
        tracks_skipped = summary.tracks_skipped,
        playlists_added = summary.playlists_added,
        playlists_skipped = summary.playlists_skipped,
        "catalog import finished"
    );
    Ok(summary)
}
