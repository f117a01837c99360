//! Player state snapshot and display helpers.

use std::time::Duration;

use crate::db::TrackWithRelations;

/// Current playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No track loaded
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Read-only snapshot of the controller, for the views.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Current playback status
    pub status: PlaybackStatus,
    /// ID of the loaded track (if any)
    pub track_id: Option<i64>,
    /// "Now playing" label, empty when idle
    pub now_playing: String,
    /// Position shown in the UI (the drag target while seeking)
    pub position: Duration,
    /// Total duration, once the source has reported it
    pub duration: Option<Duration>,
    /// Volume level (0.0 - 1.0)
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: bool,
    /// A seek drag is in progress
    pub seeking: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            track_id: None,
            now_playing: String::new(),
            position: Duration::ZERO,
            duration: None,
            volume: 0.5,
            shuffle: false,
            repeat: false,
            seeking: false,
        }
    }
}

impl PlayerState {
    /// Format position as MM:SS.
    pub fn position_str(&self) -> String {
        format_duration(self.position)
    }

    /// Format duration as MM:SS, or a placeholder while unknown.
    pub fn duration_str(&self) -> String {
        self.duration
            .map(format_duration)
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Format a duration as MM:SS or HH:MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Label shown for the loaded track: `"{title} — {artist}"`.
pub fn now_playing_label(track: &TrackWithRelations) -> String {
    let artist = track.artist_name.as_deref().unwrap_or("Unknown");
    format!("{} — {}", track.title, artist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_track;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1:01:01");
    }

    #[test]
    fn test_time_strings() {
        let state = PlayerState {
            position: Duration::from_secs(75),
            duration: Some(Duration::from_secs(200)),
            ..Default::default()
        };
        assert_eq!(state.position_str(), "1:15");
        assert_eq!(state.duration_str(), "3:20");
    }

    #[test]
    fn test_unknown_duration_placeholder() {
        let state = PlayerState::default();
        assert_eq!(state.duration_str(), "--:--");
        assert_eq!(state.position_str(), "0:00");
    }

    #[test]
    fn test_now_playing_label() {
        let track = mock_track(1, "Echoes");
        assert_eq!(now_playing_label(&track), "Echoes — Test Artist");

        let orphan = TrackWithRelations {
            artist_id: None,
            artist_name: None,
            ..track
        };
        assert_eq!(now_playing_label(&orphan), "Echoes — Unknown");
    }
}
