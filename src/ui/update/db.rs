//! Database initialization handler.

use iced::Task;

use super::super::messages::Message;
use super::super::state::{AppState, LoadedState};
use super::load_tracks_task;

/// Handle database initialization
pub fn handle_db_init(
    state: &mut AppState,
    result: Result<sqlx::SqlitePool, String>,
) -> Task<Message> {
    let AppState::Loading(config) = state else {
        tracing::warn!(target: "godless_player::ui::update", "Database initialized twice, ignoring");
        return Task::none();
    };

    match result {
        Ok(pool) => {
            let config = std::mem::take(config);
            *state = AppState::Loaded(Box::new(LoadedState::new(pool.clone(), config)));
            load_tracks_task(pool)
        }
        Err(e) => {
            tracing::error!(target: "godless_player::ui::update", error = %e, "Database initialization failed");
            *state = AppState::Error(e);
            Task::none()
        }
    }
}
