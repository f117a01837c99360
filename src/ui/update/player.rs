//! Playback control and navigation handlers.
//!
//! # Control Flow
//!
//! All player commands flow through `handle_player()`. Navigation is done on
//! the playlist first, then the controller plays whatever became current.
//! The helpers are generic over the media backend so the same code paths
//! run against the mock backend in tests.

use iced::Task;

use crate::player::{FollowUp, MediaBackend, PlaybackController, PlaybackStatus, PlayerEvent};
use crate::playlist::Playlist;

use super::super::messages::Message;
use super::super::state::LoadedState;
use super::super::views::ToastQueue;
use super::save_config_task;

// ============================================================================
// Main message handler
// ============================================================================

/// Handle player-related messages.
pub fn handle_player(s: &mut LoadedState, msg: Message) -> Task<Message> {
    // Take the player out temporarily to avoid borrow conflicts
    let Some(mut player) = s.player.take() else {
        if !matches!(msg, Message::PlayerTick) {
            s.toasts.warning("Audio output not available");
        }
        return Task::none();
    };

    let task = handle_player_inner(&mut player, s, msg);

    s.player = Some(player);
    s.sync_player_state();
    task
}

fn handle_player_inner<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    s: &mut LoadedState,
    msg: Message,
) -> Task<Message> {
    match msg {
        Message::PlayerToggle => toggle_or_start(player, &mut s.playlist, &mut s.toasts),

        Message::PlayerNext => {
            player.reset_failures();
            advance(player, &mut s.playlist, &mut s.toasts);
        }

        Message::PlayerPrevious => {
            player.reset_failures();
            go_back(player, &mut s.playlist, &mut s.toasts);
        }

        Message::PlayVisible(index) => {
            player.reset_failures();
            play_visible(player, &mut s.playlist, &mut s.toasts, index);
            s.selected = s.playlist.current().map(|t| t.id);
        }

        Message::PlaySelected => {
            if let Some(index) = s.selected_visible_index() {
                player.reset_failures();
                play_visible(player, &mut s.playlist, &mut s.toasts, index);
            }
        }

        Message::PlayerSeekPreview(secs) => player.seek_preview(secs),

        Message::PlayerSeekRelease => {
            if let Err(e) = player.seek_release() {
                s.toasts.error(format!("Seek failed: {}", e));
            }
        }

        Message::PlayerVolumeChanged(volume) => {
            player.set_volume(volume);
            s.config.audio.volume = player.volume();
        }

        Message::PlayerVolumeReleased => return save_config_task(&s.config),

        Message::PlayerToggleShuffle => {
            player.set_shuffle(!player.shuffle());
            s.config.audio.shuffle = player.shuffle();
            return save_config_task(&s.config);
        }

        Message::PlayerToggleRepeat => {
            player.set_repeat(!player.repeat());
            s.config.audio.repeat = player.repeat();
            return save_config_task(&s.config);
        }

        Message::PlayerTick => {
            let follow_up = player.dispatch(PlayerEvent::Tick);
            run_follow_up(player, &mut s.playlist, &mut s.toasts, follow_up);
        }

        _ => {}
    }
    Task::none()
}

// ============================================================================
// Navigation helpers - each action implemented once
// ============================================================================

/// Play/Pause button: start the first track when nothing is loaded,
/// otherwise pause or resume.
pub(crate) fn toggle_or_start<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
) {
    if player.status() != PlaybackStatus::Idle {
        player.toggle();
        return;
    }
    if playlist.is_empty() {
        toasts.info("The library is empty. Import some files first.");
        return;
    }

    player.reset_failures();
    if playlist.start().is_none() {
        playlist.jump_to(0);
    }
    play_current(player, playlist, toasts);
}

/// Move to the next track (random with shuffle) and play it.
pub(crate) fn advance<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
) {
    if playlist.next(player.shuffle()).is_some() {
        play_current(player, playlist, toasts);
    }
}

/// Move to the previous track and play it.
pub(crate) fn go_back<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
) {
    if playlist.previous().is_some() {
        play_current(player, playlist, toasts);
    }
}

/// Play the track at `index` of the visible list.
pub(crate) fn play_visible<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
    index: usize,
) {
    if playlist.select_visible(index).is_some() {
        play_current(player, playlist, toasts);
    }
}

/// Run the navigation a dispatched event asked for.
pub(crate) fn run_follow_up<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
    follow_up: FollowUp,
) {
    match follow_up {
        FollowUp::None => {}
        FollowUp::Replay => {
            tracing::debug!(target: "godless_player::ui::update", "Track ended, repeating");
            play_current(player, playlist, toasts);
        }
        FollowUp::Advance => {
            tracing::debug!(target: "godless_player::ui::update", "Track ended, advancing");
            advance(player, playlist, toasts);
        }
        FollowUp::Skip(message) => {
            toasts.error(format!("Playback failed: {}", message));
            if player.may_skip(playlist.len()) {
                advance(player, playlist, toasts);
            } else {
                tracing::warn!(target: "godless_player::ui::update", "No playable track found, stopping");
                toasts.warning("No playable tracks found");
            }
        }
    }
}

/// Stop playback when the removed track is the loaded one.
///
/// Returns true when playback was stopped.
pub(crate) fn stop_if_current<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    track_id: i64,
) -> bool {
    if player.current_track().is_none_or(|t| t.id != track_id) {
        return false;
    }
    player.stop();
    tracing::info!(target: "godless_player::ui::update", track_id, "Stopped playback of removed track");
    true
}

/// Play the playlist's current track, skipping forward past tracks that
/// fail to open until one plays or a full pass has failed.
///
/// Returns true when something is playing.
pub(crate) fn play_current<B: MediaBackend>(
    player: &mut PlaybackController<B>,
    playlist: &mut Playlist,
    toasts: &mut ToastQueue,
) -> bool {
    loop {
        let Some(track) = playlist.current().cloned() else {
            return false;
        };

        match player.play(&track) {
            Ok(()) => return true,
            Err(e) => {
                toasts.error(format!("Cannot play \"{}\": {}", track.title, e));
                if !player.may_skip(playlist.len()) {
                    tracing::warn!(target: "godless_player::ui::update", "No playable track found, stopping");
                    toasts.warning("No playable tracks found");
                    return false;
                }
                playlist.next(player.shuffle());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{BackendCall, MockBackend, mock_track_at, touch};
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        player: PlaybackController<MockBackend>,
        playlist: Playlist,
        toasts: ToastQueue,
        _dir: TempDir,
    }

    /// Tracks 1..=n backed by real (empty) files; IDs in `missing` point nowhere.
    fn fixture(n: i64, missing: &[i64]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let tracks = (1..=n)
            .map(|id| {
                let title = format!("T{}", id);
                if missing.contains(&id) {
                    mock_track_at(id, &title, Path::new("/nonexistent/file.mp3"))
                } else {
                    let path = touch(dir.path(), &format!("{}.mp3", title));
                    mock_track_at(id, &title, &path)
                }
            })
            .collect();

        let mut playlist = Playlist::new();
        playlist.load(tracks);
        Fixture {
            player: PlaybackController::new(MockBackend::default(), 0.5, false, false),
            playlist,
            toasts: ToastQueue::default(),
            _dir: dir,
        }
    }

    fn opened(player: &PlaybackController<MockBackend>) -> usize {
        player
            .backend()
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Open(..)))
            .count()
    }

    #[test]
    fn test_toggle_starts_first_track_when_idle() {
        let mut f = fixture(3, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        assert_eq!(f.player.status(), PlaybackStatus::Playing);
        assert_eq!(f.player.current_track().unwrap().id, 1);
        assert_eq!(f.playlist.current_index(), Some(0));

        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.status(), PlaybackStatus::Paused);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.status(), PlaybackStatus::Playing);
        assert_eq!(opened(&f.player), 1);
    }

    #[test]
    fn test_toggle_on_empty_library_informs() {
        let mut f = fixture(0, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.status(), PlaybackStatus::Idle);
        assert!(f.toasts.has_visible());
    }

    #[test]
    fn test_end_of_track_advances_and_wraps() {
        let mut f = fixture(2, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        f.player
            .backend_mut()
            .events
            .push_back(PlayerEvent::Ended { generation: 1 });
        let follow_up = f.player.dispatch(PlayerEvent::Tick);
        run_follow_up(&mut f.player, &mut f.playlist, &mut f.toasts, follow_up);
        assert_eq!(f.player.current_track().unwrap().id, 2);

        f.player
            .backend_mut()
            .events
            .push_back(PlayerEvent::Ended { generation: 2 });
        let follow_up = f.player.dispatch(PlayerEvent::Tick);
        run_follow_up(&mut f.player, &mut f.playlist, &mut f.toasts, follow_up);
        assert_eq!(f.player.current_track().unwrap().id, 1);
    }

    #[test]
    fn test_repeat_replays_same_track() {
        let mut f = fixture(2, &[]);
        f.player.set_repeat(true);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        let follow_up = f.player.dispatch(PlayerEvent::Ended { generation: 1 });
        run_follow_up(&mut f.player, &mut f.playlist, &mut f.toasts, follow_up);

        assert_eq!(f.player.current_track().unwrap().id, 1);
        assert_eq!(f.player.status(), PlaybackStatus::Playing);
        assert_eq!(opened(&f.player), 2);
    }

    #[test]
    fn test_missing_file_is_skipped_with_toast() {
        let mut f = fixture(3, &[1]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        assert_eq!(f.player.current_track().unwrap().id, 2);
        assert_eq!(f.playlist.current_index(), Some(1));
        assert!(f.toasts.has_visible());
    }

    #[test]
    fn test_all_missing_stops_after_one_pass() {
        let mut f = fixture(3, &[1, 2, 3]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        assert_eq!(f.player.status(), PlaybackStatus::Idle);
        assert_eq!(opened(&f.player), 0);
        // Three failures plus the final warning
        assert_eq!(f.toasts.visible().count(), 4);
    }

    #[test]
    fn test_failed_event_skips_to_next() {
        let mut f = fixture(2, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        let follow_up = f.player.dispatch(PlayerEvent::Failed {
            generation: 1,
            message: "decoder error".to_string(),
        });
        run_follow_up(&mut f.player, &mut f.playlist, &mut f.toasts, follow_up);

        assert_eq!(f.player.current_track().unwrap().id, 2);
        assert_eq!(f.player.status(), PlaybackStatus::Playing);
    }

    fn last_generation(player: &PlaybackController<MockBackend>) -> u64 {
        player
            .backend()
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                BackendCall::Open(_, generation) => Some(*generation),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_undecodable_library_stops_after_one_pass() {
        let mut f = fixture(3, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);

        // Every source opens, then finishes without producing audio
        for _ in 0..30 {
            if !f.player.timer_active() {
                break;
            }
            let generation = last_generation(&f.player);
            let events = &mut f.player.backend_mut().events;
            events.push_back(PlayerEvent::Opened {
                generation,
                duration: None,
            });
            events.push_back(PlayerEvent::Failed {
                generation,
                message: "no audio could be decoded".to_string(),
            });
            let follow_up = f.player.dispatch(PlayerEvent::Tick);
            run_follow_up(&mut f.player, &mut f.playlist, &mut f.toasts, follow_up);
        }

        assert_eq!(f.player.status(), PlaybackStatus::Idle);
        assert_eq!(opened(&f.player), 3);
        // Three failures plus the final warning
        assert_eq!(f.toasts.visible().count(), 4);
    }

    #[test]
    fn test_removing_loaded_track_stops_playback() {
        let mut f = fixture(3, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        f.player.pause();

        assert!(stop_if_current(&mut f.player, 1));
        assert_eq!(f.player.status(), PlaybackStatus::Idle);
        assert!(f.player.current_track().is_none());
        assert!(!f.player.timer_active());
        assert_eq!(f.player.backend().calls.last(), Some(&BackendCall::Stop));
    }

    #[test]
    fn test_removing_other_track_keeps_playing() {
        let mut f = fixture(3, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        let calls_before = f.player.backend().calls.len();

        assert!(!stop_if_current(&mut f.player, 2));
        assert_eq!(f.player.status(), PlaybackStatus::Playing);
        assert_eq!(f.player.current_track().unwrap().id, 1);
        assert_eq!(f.player.backend().calls.len(), calls_before);
    }

    #[test]
    fn test_removing_track_while_idle_is_noop() {
        let mut f = fixture(1, &[]);
        assert!(!stop_if_current(&mut f.player, 1));
        assert_eq!(f.player.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_previous_from_first_wraps_to_last() {
        let mut f = fixture(3, &[]);
        toggle_or_start(&mut f.player, &mut f.playlist, &mut f.toasts);
        go_back(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.current_track().unwrap().id, 3);
    }

    #[test]
    fn test_play_visible_uses_full_list_position() {
        let mut f = fixture(3, &[]);
        f.playlist.set_query("T3");
        play_visible(&mut f.player, &mut f.playlist, &mut f.toasts, 0);
        assert_eq!(f.player.current_track().unwrap().id, 3);

        advance(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.current_track().unwrap().id, 1);
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut f = fixture(0, &[]);
        advance(&mut f.player, &mut f.playlist, &mut f.toasts);
        go_back(&mut f.player, &mut f.playlist, &mut f.toasts);
        assert_eq!(f.player.status(), PlaybackStatus::Idle);
        assert_eq!(opened(&f.player), 0);
    }
}
