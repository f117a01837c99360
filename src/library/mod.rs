//! Library operations that combine several store calls into one change.
//!
//! - [`import_files`]: add audio files with placeholder artist/album/genre
//! - [`edit_track`]: rename a track and reassign its references by name
//! - [`remove_track`]: delete a track
//!
//! Multi-step operations run in a single transaction and commit once.

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;

use crate::config::LibraryConfig;
use crate::db::{self, NewTrack, TrackUpdate, TrackWithRelations};
use crate::error::{Error, Result, ResultExt};
use crate::model::{EntityKind, Track};

/// Placeholder names and the accepted extension for imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDefaults {
    /// Extension without the dot, compared case-insensitively
    pub extension: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self::from(&LibraryConfig::default())
    }
}

impl From<&LibraryConfig> for ImportDefaults {
    fn from(config: &LibraryConfig) -> Self {
        Self {
            extension: config.import_extension.trim_start_matches('.').to_string(),
            artist: config.default_artist.clone(),
            album: config.default_album.clone(),
            genre: config.default_genre.clone(),
        }
    }
}

impl ImportDefaults {
    /// Whether `path` carries the accepted extension.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

/// Why a path was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Does not exist or is not a regular file
    Missing,
    /// Wrong extension
    Unsupported,
}

/// Result of an import batch.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Newly created tracks, in the order given
    pub imported: Vec<TrackWithRelations>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

/// Import files as tracks titled with their file stem.
///
/// Paths that do not exist, are not files, or have another extension are
/// skipped. Every imported track references the placeholder artist, album
/// and genre, created on first use.
pub async fn import_files(
    pool: &SqlitePool,
    paths: &[PathBuf],
    defaults: &ImportDefaults,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut accepted = Vec::new();

    for path in paths {
        if !path.is_file() {
            tracing::debug!(target: "godless_player::library::import", path = %path.display(), "Skipping missing file");
            report.skipped.push((path.clone(), SkipReason::Missing));
        } else if !defaults.accepts(path) {
            tracing::debug!(target: "godless_player::library::import", path = %path.display(), "Skipping unsupported file");
            report.skipped.push((path.clone(), SkipReason::Unsupported));
        } else {
            accepted.push(path);
        }
    }

    if accepted.is_empty() {
        return Ok(report);
    }

    let mut tx = pool.begin().await.with_context("starting import")?;
    let artist_id = db::get_or_create(&mut tx, EntityKind::Artist, &defaults.artist).await?;
    let album_id = db::get_or_create(&mut tx, EntityKind::Album, &defaults.album).await?;
    let genre_id = db::get_or_create(&mut tx, EntityKind::Genre, &defaults.genre).await?;

    let mut ids = Vec::with_capacity(accepted.len());
    for path in accepted {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());
        let title = resolved
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let id = db::insert_track(
            &mut tx,
            &NewTrack {
                title,
                path: resolved.to_string_lossy().into_owned(),
                artist_id: Some(artist_id),
                album_id: Some(album_id),
                genre_id: Some(genre_id),
            },
        )
        .await?;
        ids.push(id);
    }

    for id in ids {
        if let Some(track) = db::get_track_with_relations(&mut tx, id).await? {
            report.imported.push(track);
        }
    }
    tx.commit().await.with_context("committing import")?;

    tracing::info!(
        target: "godless_player::library::import",
        imported = report.imported.len(),
        skipped = report.skipped.len(),
        "Import finished"
    );
    Ok(report)
}

/// Values entered in the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackEdit {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

impl TrackEdit {
    /// Prefill from a track; absent references become empty strings.
    pub fn from_track(track: &TrackWithRelations) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist_name.clone().unwrap_or_default(),
            album: track.album_name.clone().unwrap_or_default(),
            genre: track.genre_name.clone().unwrap_or_default(),
        }
    }

    /// Text entered for one of the named references.
    pub fn entity(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Artist => &self.artist,
            EntityKind::Album => &self.album,
            EntityKind::Genre => &self.genre,
        }
    }

    pub fn entity_mut(&mut self, kind: EntityKind) -> &mut String {
        match kind {
            EntityKind::Artist => &mut self.artist,
            EntityKind::Album => &mut self.album,
            EntityKind::Genre => &mut self.genre,
        }
    }
}

/// Apply an edit and return the track re-read with its names.
///
/// Text is trimmed. An empty title keeps the old one; an empty
/// artist/album/genre leaves that reference unchanged. Non-empty names are
/// looked up or created.
pub async fn edit_track(
    pool: &SqlitePool,
    track_id: i64,
    edit: &TrackEdit,
) -> Result<TrackWithRelations> {
    let mut tx = pool.begin().await.with_context("starting edit")?;

    let title = edit.title.trim();
    let mut update = TrackUpdate {
        title: (!title.is_empty()).then(|| title.to_string()),
        ..Default::default()
    };

    for kind in EntityKind::ALL {
        let name = edit.entity(kind).trim();
        if name.is_empty() {
            continue;
        }
        let id = db::get_or_create(&mut tx, kind, name).await?;
        match kind {
            EntityKind::Artist => update.artist_id = Some(id),
            EntityKind::Album => update.album_id = Some(id),
            EntityKind::Genre => update.genre_id = Some(id),
        }
    }

    if !db::update_track(&mut tx, track_id, &update).await? {
        return Err(Error::TrackNotFound(track_id));
    }
    let track = db::get_track_with_relations(&mut tx, track_id)
        .await?
        .ok_or(Error::TrackNotFound(track_id))?;
    tx.commit().await.with_context("committing edit")?;

    tracing::info!(target: "godless_player::library::edit", track_id, "Track updated");
    Ok(track)
}

/// Delete a track and return the removed row. Its artist, album and genre
/// are kept.
pub async fn remove_track(pool: &SqlitePool, track_id: i64) -> Result<Track> {
    let track = db::get_track_by_id(pool, track_id)
        .await?
        .ok_or(Error::TrackNotFound(track_id))?;
    if !db::delete_track(pool, track_id).await? {
        return Err(Error::TrackNotFound(track_id));
    }
    tracing::info!(target: "godless_player::library::remove", track_id, title = %track.title, "Track deleted");
    Ok(track)
}

/// Load the whole library in import order.
pub async fn load_library(pool: &SqlitePool) -> Result<Vec<TrackWithRelations>> {
    Ok(db::get_all_tracks_with_relations(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Playlist;
    use crate::test_utils::{temp_db, touch};

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let defaults = ImportDefaults::default();
        assert!(defaults.accepts(Path::new("/a/b.mp3")));
        assert!(defaults.accepts(Path::new("/a/b.MP3")));
        assert!(!defaults.accepts(Path::new("/a/b.flac")));
        assert!(!defaults.accepts(Path::new("/a/noext")));
    }

    #[test]
    fn test_defaults_strip_leading_dot() {
        let config = LibraryConfig {
            import_extension: ".ogg".to_string(),
            ..Default::default()
        };
        let defaults = ImportDefaults::from(&config);
        assert!(defaults.accepts(Path::new("song.ogg")));
    }

    #[tokio::test]
    async fn test_import_then_reload_title_is_file_stem() {
        let (pool, dir) = temp_db().await;
        let file = touch(dir.path(), "Shine On.mp3");

        let report = import_files(&pool, &[file], &ImportDefaults::default())
            .await
            .unwrap();
        assert_eq!(report.imported.len(), 1);

        let tracks = load_library(&pool).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Shine On");
        assert_eq!(tracks[0].artist_name.as_deref(), Some("Unknown"));
        assert_eq!(tracks[0].album_name.as_deref(), Some("No Album"));
        assert_eq!(tracks[0].genre_name.as_deref(), Some("Unclassified"));
        assert_eq!(tracks[0], report.imported[0]);
    }

    #[tokio::test]
    async fn test_import_skips_missing_and_unsupported() {
        let (pool, dir) = temp_db().await;
        let good = touch(dir.path(), "a.mp3");
        let wrong = touch(dir.path(), "notes.txt");
        let missing = dir.path().join("gone.mp3");

        let report = import_files(
            &pool,
            &[missing.clone(), good, wrong.clone(), dir.path().to_path_buf()],
            &ImportDefaults::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.imported.len(), 1);
        assert_eq!(
            report.skipped,
            vec![
                (missing, SkipReason::Missing),
                (wrong, SkipReason::Unsupported),
                (dir.path().to_path_buf(), SkipReason::Missing),
            ]
        );
    }

    #[tokio::test]
    async fn test_import_nothing_creates_no_placeholders() {
        let (pool, dir) = temp_db().await;
        let missing = dir.path().join("gone.mp3");

        let report = import_files(&pool, &[missing], &ImportDefaults::default())
            .await
            .unwrap();
        assert!(report.imported.is_empty());
        assert_eq!(
            db::count_entities(&pool, EntityKind::Artist).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_import_reuses_placeholders_and_keeps_order() {
        let (pool, dir) = temp_db().await;
        let a = touch(dir.path(), "A.mp3");
        let b = touch(dir.path(), "B.mp3");

        import_files(&pool, &[a.clone(), b], &ImportDefaults::default())
            .await
            .unwrap();
        // Same file twice is allowed
        import_files(&pool, &[a], &ImportDefaults::default())
            .await
            .unwrap();

        let tracks = load_library(&pool).await.unwrap();
        let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "A"]);
        for kind in EntityKind::ALL {
            assert_eq!(db::count_entities(&pool, kind).await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn test_import_then_navigate() {
        let (pool, dir) = temp_db().await;
        let a = touch(dir.path(), "A.mp3");
        let b = touch(dir.path(), "B.mp3");
        import_files(&pool, &[a, b], &ImportDefaults::default())
            .await
            .unwrap();

        let mut playlist = Playlist::new();
        playlist.load(load_library(&pool).await.unwrap());

        assert_eq!(playlist.next(false).unwrap().title, "A");
        assert_eq!(playlist.next(false).unwrap().title, "B");
        assert_eq!(playlist.next(false).unwrap().title, "A");
    }

    #[tokio::test]
    async fn test_edit_artist_creates_then_reuses() {
        let (pool, dir) = temp_db().await;
        let files = [touch(dir.path(), "one.mp3"), touch(dir.path(), "two.mp3")];
        let report = import_files(&pool, &files, &ImportDefaults::default())
            .await
            .unwrap();
        let (first, second) = (&report.imported[0], &report.imported[1]);
        assert_eq!(first.artist_name.as_deref(), Some("Unknown"));

        let edit = TrackEdit {
            artist: "Pink Floyd".to_string(),
            ..TrackEdit::from_track(first)
        };
        let edited = edit_track(&pool, first.id, &edit).await.unwrap();
        assert_eq!(edited.artist_name.as_deref(), Some("Pink Floyd"));
        assert_ne!(edited.artist_id, first.artist_id);
        assert_eq!(
            db::count_entities(&pool, EntityKind::Artist).await.unwrap(),
            2
        );

        let edit = TrackEdit {
            artist: "Pink Floyd".to_string(),
            ..TrackEdit::from_track(second)
        };
        let edited_second = edit_track(&pool, second.id, &edit).await.unwrap();
        assert_eq!(edited_second.artist_id, edited.artist_id);
        assert_eq!(
            db::count_entities(&pool, EntityKind::Artist).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_edit_empty_fields_keep_existing_values() {
        let (pool, dir) = temp_db().await;
        let file = touch(dir.path(), "keep.mp3");
        let report = import_files(&pool, &[file], &ImportDefaults::default())
            .await
            .unwrap();
        let original = &report.imported[0];

        let edit = TrackEdit {
            title: "   ".to_string(),
            artist: String::new(),
            album: "  Animals  ".to_string(),
            genre: String::new(),
        };
        let edited = edit_track(&pool, original.id, &edit).await.unwrap();

        assert_eq!(edited.title, "keep");
        assert_eq!(edited.artist_id, original.artist_id);
        assert_eq!(edited.album_name.as_deref(), Some("Animals"));
        assert_eq!(edited.genre_id, original.genre_id);
    }

    #[tokio::test]
    async fn test_edit_missing_track_fails_without_side_effects() {
        let (pool, _dir) = temp_db().await;
        let edit = TrackEdit {
            artist: "Ghost".to_string(),
            ..Default::default()
        };

        let err = edit_track(&pool, 404, &edit).await.unwrap_err();
        assert!(matches!(err, Error::TrackNotFound(404)));
        // Rolled back with the transaction
        assert_eq!(
            db::count_entities(&pool, EntityKind::Artist).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_remove_current_track() {
        let (pool, dir) = temp_db().await;
        let files = [
            touch(dir.path(), "a.mp3"),
            touch(dir.path(), "b.mp3"),
            touch(dir.path(), "c.mp3"),
        ];
        import_files(&pool, &files, &ImportDefaults::default())
            .await
            .unwrap();

        let mut playlist = Playlist::new();
        playlist.load(load_library(&pool).await.unwrap());
        let current = playlist.jump_to(1).unwrap().id;

        let removed = remove_track(&pool, current).await.unwrap();
        assert_eq!(removed.id, current);
        playlist.remove(current);

        assert!(load_library(&pool).await.unwrap().iter().all(|t| t.id != current));
        assert!(playlist.tracks().iter().all(|t| t.id != current));
        for _ in 0..3 {
            assert_ne!(playlist.next(false).unwrap().id, current);
        }

        assert!(matches!(
            remove_track(&pool, current).await,
            Err(Error::TrackNotFound(_))
        ));
        // Placeholder rows survive deletion
        assert_eq!(
            db::count_entities(&pool, EntityKind::Genre).await.unwrap(),
            1
        );
    }
}
