//! Keyboard shortcut handling.
//!
//! Maps keyboard events to player and library actions. Only events not
//! captured by a widget arrive here, so typing in the search box or the
//! edit dialog never triggers a shortcut.

use iced::Task;
use iced::keyboard::{self, key};

use super::super::messages::Message;
use super::super::state::LoadedState;

/// Handle keyboard shortcuts.
///
/// Returns a Task if the key triggered an action, or Task::none() if unhandled.
pub fn handle_keyboard(
    s: &LoadedState,
    key: keyboard::Key,
    modifiers: keyboard::Modifiers,
) -> Task<Message> {
    // The edit dialog is modal: only Escape and Enter mean something
    if s.edit.is_some() {
        return match key.as_ref() {
            keyboard::Key::Named(key::Named::Escape) => Task::done(Message::EditCancel),
            keyboard::Key::Named(key::Named::Enter) => Task::done(Message::EditSave),
            _ => Task::none(),
        };
    }

    match key.as_ref() {
        keyboard::Key::Named(key::Named::Space) if modifiers.is_empty() => {
            tracing::debug!(target: "godless_player::ui::keyboard", "Space pressed - toggling playback");
            Task::done(Message::PlayerToggle)
        }

        keyboard::Key::Named(key::Named::ArrowLeft) if modifiers.is_empty() => {
            tracing::debug!(target: "godless_player::ui::keyboard", "Left pressed - previous track");
            Task::done(Message::PlayerPrevious)
        }

        keyboard::Key::Named(key::Named::ArrowRight) if modifiers.is_empty() => {
            tracing::debug!(target: "godless_player::ui::keyboard", "Right pressed - next track");
            Task::done(Message::PlayerNext)
        }

        keyboard::Key::Named(key::Named::ArrowUp) if modifiers.is_empty() => {
            Task::done(Message::SelectPrevious)
        }

        keyboard::Key::Named(key::Named::ArrowDown) if modifiers.is_empty() => {
            Task::done(Message::SelectNext)
        }

        keyboard::Key::Named(key::Named::Enter) if modifiers.is_empty() => {
            Task::done(Message::PlaySelected)
        }

        keyboard::Key::Named(key::Named::Delete) if modifiers.is_empty() => {
            Task::done(Message::DeletePressed)
        }

        keyboard::Key::Named(key::Named::Escape) if !s.playlist.query().is_empty() => {
            Task::done(Message::ClearSearch)
        }

        keyboard::Key::Character("e") if modifiers.command() => Task::done(Message::EditPressed),

        keyboard::Key::Character("o") if modifiers.command() => {
            Task::done(Message::ImportPressed)
        }

        _ => Task::none(),
    }
}
