//! Message types for the Godless Player UI.

use iced::keyboard;
use std::path::PathBuf;

use crate::db::TrackWithRelations;
use crate::library::ImportReport;
use crate::model::EntityKind;

/// Field of the edit dialog being typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Entity(EntityKind),
}

/// All messages that can be sent to the UI
#[derive(Debug, Clone)]
pub enum Message {
    DbInitialized(Result<sqlx::SqlitePool, String>),
    TracksLoaded(Result<Vec<TrackWithRelations>, String>),

    // Import
    ImportPressed,
    ImportPicked(Option<Vec<PathBuf>>),
    ImportFinished(Result<ImportReport, String>),

    // Delete
    DeletePressed,
    DeleteConfirmed(i64, bool),
    DeleteFinished(Result<i64, String>),

    // Edit dialog
    EditPressed,
    EditFieldChanged(EditField, String),
    EditSave,
    EditCancel,
    EditFinished(Result<TrackWithRelations, String>),

    // Selection
    TrackSelected(i64),
    SelectPrevious,
    SelectNext,
    /// Play the track at this index of the visible list
    PlayVisible(usize),
    PlaySelected,

    // Search
    SearchQueryChanged(String),
    ClearSearch,

    // Player
    PlayerToggle,
    PlayerNext,
    PlayerPrevious,
    PlayerSeekPreview(f32),
    PlayerSeekRelease,
    PlayerVolumeChanged(f32),
    PlayerVolumeReleased,
    PlayerToggleShuffle,
    PlayerToggleRepeat,
    PlayerTick,

    ConfigSaved(Result<(), String>),
    /// A native message dialog was closed
    DialogClosed,

    // Toasts
    ToastDismiss(u64),
    ToastExpireTick,

    KeyPressed(keyboard::Key, keyboard::Modifiers),
}
