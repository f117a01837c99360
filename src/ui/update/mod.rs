//! Update handlers for application messages.
//!
//! This module is split into submodules by concern:
//! - `db`: Database initialization
//! - `library`: Import, delete and the edit dialog
//! - `player`: Playback control and navigation
//! - `selection`: Track selection and search
//! - `keyboard`: Keyboard shortcuts

mod db;
mod keyboard;
mod library;
mod player;
mod selection;

use iced::Task;

use crate::config::{self, Config};

use super::messages::Message;

pub use db::handle_db_init;
pub use keyboard::handle_keyboard;
pub use library::{handle_delete, handle_edit, handle_import};
pub use player::handle_player;
pub use selection::handle_selection;

/// Helper to load tracks from database
pub(crate) fn load_tracks_task(pool: sqlx::SqlitePool) -> Task<Message> {
    Task::perform(
        async move {
            crate::library::load_library(&pool)
                .await
                .map_err(|e| e.to_string())
        },
        Message::TracksLoaded,
    )
}

/// Helper to persist the config in the background
pub(crate) fn save_config_task(config: &Config) -> Task<Message> {
    Task::perform(config::save_async(config.clone()), |result| {
        Message::ConfigSaved(result.map_err(|e| e.to_string()))
    })
}

/// Helper to show a native warning dialog
pub(crate) fn warning_dialog_task(title: &'static str, description: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title(title)
                .set_description(description)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await
        },
        |_| Message::DialogClosed,
    )
}
