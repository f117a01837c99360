//! Selection and search handling.
//!
//! The selection is kept as a track ID so it survives filtering; keyboard
//! stepping moves through the visible list and stops at either end.

use iced::Task;

use crate::db::TrackWithRelations;

use super::super::messages::Message;
use super::super::state::LoadedState;

/// Handle selection-related messages.
pub fn handle_selection(s: &mut LoadedState, message: Message) -> Task<Message> {
    match message {
        Message::TrackSelected(id) => {
            s.selected = Some(id);
        }

        Message::SelectPrevious => {
            s.selected = step(s.playlist.visible(), s.selected, Direction::Up);
            tracing::debug!(target: "godless_player::ui::selection", "Selection: {:?}", s.selected);
        }

        Message::SelectNext => {
            s.selected = step(s.playlist.visible(), s.selected, Direction::Down);
            tracing::debug!(target: "godless_player::ui::selection", "Selection: {:?}", s.selected);
        }

        Message::SearchQueryChanged(query) => {
            s.playlist.set_query(query);
            s.status_message = search_status(s.playlist.visible().len(), s.playlist.len());
        }

        Message::ClearSearch => {
            s.playlist.set_query("");
            s.status_message = search_status(s.playlist.visible().len(), s.playlist.len());
        }

        _ => {}
    }
    Task::none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Move the selection one row within `visible`.
///
/// With nothing selected (or a selection that is filtered out) the first
/// row is picked.
fn step(visible: &[TrackWithRelations], selected: Option<i64>, direction: Direction) -> Option<i64> {
    if visible.is_empty() {
        return selected;
    }
    let current = selected.and_then(|id| visible.iter().position(|t| t.id == id));
    let index = match (current, direction) {
        (None, _) => 0,
        (Some(i), Direction::Up) => i.saturating_sub(1),
        (Some(i), Direction::Down) => (i + 1).min(visible.len() - 1),
    };
    Some(visible[index].id)
}

fn search_status(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{} tracks in library.", total)
    } else {
        format!("Showing {} of {} tracks.", shown, total)
    }
}
