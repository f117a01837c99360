//! Test utilities and fixtures for godless-player tests.
//!
//! This module provides common test helpers, mock factories, a recording
//! media backend and database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use godless_player::test_utils::{temp_db, mock_track};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let track = mock_track(1, "Echoes");
//!     // ... test logic
//! }
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::db::TrackWithRelations;
use crate::player::{MediaBackend, PlayerError, PlayerEvent};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test:
///
/// ```ignore
/// let (pool, _dir) = temp_db().await;
/// ```
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = crate::db::db_url(Some(&db_path));

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a mock TrackWithRelations with the given ID and title.
///
/// Artist, album and genre are set to "Test Artist", "Test Album" and
/// "Test Genre". Customize using struct update syntax:
///
/// ```ignore
/// let track = TrackWithRelations {
///     artist_name: Some("Pink Floyd".to_string()),
///     ..mock_track(1, "Echoes")
/// };
/// ```
pub fn mock_track(id: i64, title: &str) -> TrackWithRelations {
    TrackWithRelations {
        id,
        title: title.to_string(),
        path: format!("/music/track_{}.mp3", id),
        artist_id: Some(1),
        album_id: Some(1),
        genre_id: Some(1),
        artist_name: Some("Test Artist".to_string()),
        album_name: Some("Test Album".to_string()),
        genre_name: Some("Test Genre".to_string()),
    }
}

/// Creates a mock track pointing at a specific file.
pub fn mock_track_at(id: i64, title: &str, path: &Path) -> TrackWithRelations {
    TrackWithRelations {
        path: path.to_string_lossy().into_owned(),
        ..mock_track(id, title)
    }
}

/// Creates `n` mock tracks with IDs `1..=n` titled "Track {id}".
pub fn mock_tracks(n: usize) -> Vec<TrackWithRelations> {
    (1..=n as i64)
        .map(|id| mock_track(id, &format!("Track {}", id)))
        .collect()
}

/// Creates an empty file with the given name inside `dir`.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"").expect("Failed to create test file");
    path
}

/// A call made against [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Open(PathBuf, u64),
    Play,
    Pause,
    Stop,
    Seek(Duration),
    SetVolume(f32),
}

/// Media backend that records calls and replays queued events.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub calls: Vec<BackendCall>,
    /// Returned by `poll_event`, front first
    pub events: VecDeque<PlayerEvent>,
    /// Reported by `position`
    pub position: Duration,
    /// Make `open` fail with a decode error
    pub fail_open: bool,
}

impl MediaBackend for MockBackend {
    fn open(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError> {
        if self.fail_open {
            return Err(PlayerError::Decode(path.display().to_string()));
        }
        self.calls
            .push(BackendCall::Open(path.to_path_buf(), generation));
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(BackendCall::Play);
    }

    fn pause(&mut self) {
        self.calls.push(BackendCall::Pause);
    }

    fn stop(&mut self) {
        self.calls.push(BackendCall::Stop);
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.calls.push(BackendCall::Seek(position));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(BackendCall::SetVolume(volume));
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let tracks = crate::db::get_all_tracks_with_relations(&pool).await.unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_mock_track_defaults() {
        let track = mock_track(42, "Echoes");
        assert_eq!(track.id, 42);
        assert_eq!(track.title, "Echoes");
        assert_eq!(track.genre_name.as_deref(), Some("Test Genre"));
        assert!(!track.path.is_empty());
    }

    #[test]
    fn test_mock_tracks_are_distinct() {
        let tracks = mock_tracks(3);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[2].title, "Track 3");
        assert_ne!(tracks[0], tracks[1]);
    }
}
