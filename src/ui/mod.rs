//! UI module for Godless Player.

mod messages;
mod state;
pub mod theme;
mod update;
mod views;

use iced::widget::{container, text};
use iced::{Element, Length, Subscription, Task, keyboard, time};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;

pub use messages::Message;
use state::AppState;
use theme::{color, typography};

/// Position refresh while playing
const PLAYER_TICK: Duration = Duration::from_secs(1);

/// How often expired toasts are swept
const TOAST_TICK: Duration = Duration::from_millis(500);

pub struct GodlessPlayer {
    state: AppState,
}

impl GodlessPlayer {
    pub fn new(config: Config, db_path: PathBuf) -> (Self, Task<Message>) {
        tracing::debug!(target: "godless_player::ui", db = %db_path.display(), "UI::new() started");

        let init_db = Task::perform(
            async move {
                let start = Instant::now();
                if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        return Err(format!("Cannot create {}: {}", parent.display(), e));
                    }
                }
                let result = crate::db::init_db(&crate::db::db_url(Some(&db_path)))
                    .await
                    .map_err(|e| e.to_string());
                tracing::info!(
                    target: "godless_player::ui",
                    "Database init completed in {:.1}ms",
                    start.elapsed().as_secs_f64() * 1000.0
                );
                result
            },
            Message::DbInitialized,
        );

        (
            Self {
                state: AppState::Loading(config),
            },
            init_db,
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let AppState::Loaded(s) = &self.state else {
            return Subscription::none();
        };

        let mut subscriptions = Vec::new();

        // Only tick while something is actually playing
        if s.player.as_ref().is_some_and(|p| p.timer_active()) {
            subscriptions.push(time::every(PLAYER_TICK).map(|_| Message::PlayerTick));
        }

        if s.toasts.has_visible() {
            subscriptions.push(time::every(TOAST_TICK).map(|_| Message::ToastExpireTick));
        }

        subscriptions.push(keyboard::on_key_press(|key, modifiers| {
            Some(Message::KeyPressed(key, modifiers))
        }));

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state {
            AppState::Loading(_) => centered(
                text("Opening library...")
                    .size(typography::SIZE_HEADING)
                    .color(color::TEXT_SECONDARY),
            ),
            AppState::Loaded(s) => views::loaded_view(s),
            AppState::Error(e) => centered(
                text(format!("Error: {}", e))
                    .size(typography::SIZE_HEADING)
                    .color(color::ERROR),
            ),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::PlayerTick | Message::ToastExpireTick) {
            tracing::trace!(target: "godless_player::ui::update", message = ?message, "Update received");
        }

        if let Message::DbInitialized(result) = message {
            return update::handle_db_init(&mut self.state, result);
        }

        let AppState::Loaded(s) = &mut self.state else {
            return Task::none();
        };

        match message {
            Message::TracksLoaded(Ok(tracks)) => {
                s.playlist.load(tracks);
                s.tracks_loading = false;
                s.status_message = format!("{} tracks in library.", s.playlist.len());
            }
            Message::TracksLoaded(Err(e)) => {
                tracing::error!(target: "godless_player::ui::update", error = %e, "Failed to load tracks");
                s.tracks_loading = false;
                s.status_message = format!("Error loading tracks: {}", e);
            }

            Message::ImportPressed | Message::ImportPicked(_) | Message::ImportFinished(_) => {
                return update::handle_import(s, message);
            }

            Message::DeletePressed | Message::DeleteConfirmed(..) | Message::DeleteFinished(_) => {
                return update::handle_delete(s, message);
            }

            Message::EditPressed
            | Message::EditFieldChanged(..)
            | Message::EditSave
            | Message::EditCancel
            | Message::EditFinished(_) => {
                return update::handle_edit(s, message);
            }

            Message::TrackSelected(_)
            | Message::SelectPrevious
            | Message::SelectNext
            | Message::SearchQueryChanged(_)
            | Message::ClearSearch => {
                return update::handle_selection(s, message);
            }

            Message::PlayVisible(_)
            | Message::PlaySelected
            | Message::PlayerToggle
            | Message::PlayerNext
            | Message::PlayerPrevious
            | Message::PlayerSeekPreview(_)
            | Message::PlayerSeekRelease
            | Message::PlayerVolumeChanged(_)
            | Message::PlayerVolumeReleased
            | Message::PlayerToggleShuffle
            | Message::PlayerToggleRepeat
            | Message::PlayerTick => {
                return update::handle_player(s, message);
            }

            Message::ConfigSaved(Err(e)) => {
                tracing::warn!(target: "godless_player::ui::update", error = %e, "Failed to save config");
                s.toasts.warning(format!("Settings not saved: {}", e));
            }

            Message::ToastDismiss(id) => s.toasts.remove(id),
            Message::ToastExpireTick => s.toasts.remove_expired(),

            Message::KeyPressed(key, modifiers) => {
                return update::handle_keyboard(s, key, modifiers);
            }

            Message::ConfigSaved(Ok(())) | Message::DialogClosed | Message::DbInitialized(_) => {}
        }
        Task::none()
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_| theme::container_style(color::BASE))
        .into()
}
