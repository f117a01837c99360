//! Application state types for the Godless Player UI.

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::TrackWithRelations;
use crate::library::TrackEdit;
use crate::player::{PlaybackController, PlayerState, RodioBackend};
use crate::playlist::Playlist;

use super::views::ToastQueue;

/// Top-level application state
///
/// Note: LoadedState is boxed to reduce stack size (Clippy large_enum_variant)
pub enum AppState {
    /// Waiting for the database; holds the config until then
    Loading(Config),
    Loaded(Box<LoadedState>),
    Error(String),
}

/// Open edit dialog
#[derive(Debug, Clone)]
pub struct EditDialog {
    pub track_id: i64,
    pub form: TrackEdit,
    /// Save in flight
    pub saving: bool,
}

/// State for a fully loaded application
pub struct LoadedState {
    pub pool: SqlitePool,
    pub config: Config,

    pub playlist: Playlist,
    pub tracks_loading: bool,
    /// Selected track (by ID, so it survives filtering)
    pub selected: Option<i64>,
    pub status_message: String,

    /// None when no audio output could be opened
    pub player: Option<PlaybackController<RodioBackend>>,
    pub player_state: PlayerState,

    pub edit: Option<EditDialog>,
    pub toasts: ToastQueue,
}

impl LoadedState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let audio = &config.audio;
        let mut toasts = ToastQueue::default();

        let player = match RodioBackend::new() {
            Ok(backend) => Some(PlaybackController::new(
                backend,
                audio.volume,
                audio.shuffle,
                audio.repeat,
            )),
            Err(e) => {
                tracing::error!(target: "godless_player::ui::state", error = %e, "Audio output unavailable");
                toasts.error(format!("No audio output: {}", e));
                None
            }
        };

        let player_state = match &player {
            Some(p) => p.snapshot(),
            None => PlayerState {
                volume: audio.volume,
                shuffle: audio.shuffle,
                repeat: audio.repeat,
                ..Default::default()
            },
        };

        Self {
            pool,
            config,
            playlist: Playlist::new(),
            tracks_loading: true,
            selected: None,
            status_message: "Loading library...".to_string(),
            player,
            player_state,
            edit: None,
            toasts,
        }
    }

    /// Selected track, if it is still in the visible list.
    pub fn selected_track(&self) -> Option<&TrackWithRelations> {
        let id = self.selected?;
        self.playlist.visible().iter().find(|t| t.id == id)
    }

    /// Position of the selection in the visible list.
    pub fn selected_visible_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.playlist.visible().iter().position(|t| t.id == id)
    }

    /// Refresh the player snapshot used by the views.
    pub fn sync_player_state(&mut self) {
        if let Some(player) = &self.player {
            self.player_state = player.snapshot();
        }
    }
}
