//! Playback controller.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  UI (iced update, single thread)                │
//! │   play / pause / resume / seek / volume, 1s Tick while Playing  │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ dispatch(PlayerEvent) -> FollowUp
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      PlaybackController                         │
//! │          Idle ⇄ Playing ⇄ Paused, generation, position          │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ MediaBackend
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                rodio sink (decoding + output)                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller does not know about the playlist. End-of-track and
//! failures come back as a [`FollowUp`] and the caller runs the navigation.

mod backend;
mod state;

pub use backend::{MediaBackend, PlayerEvent, RodioBackend};
pub use state::{PlaybackStatus, PlayerState, format_duration, now_playing_label};

use std::time::Duration;

use crate::db::TrackWithRelations;

/// What the caller should do after an event was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// Play the same track again (repeat)
    Replay,
    /// Move to the next track
    Advance,
    /// The current source failed; report and move on
    Skip(String),
}

/// Playback state machine wrapping a single media backend.
pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    status: PlaybackStatus,
    current: Option<TrackWithRelations>,
    /// Incremented on every open
    generation: u64,
    position: Duration,
    duration: Option<Duration>,
    /// Drag target while the seek slider is held
    seek_preview: Option<Duration>,
    volume: f32,
    shuffle: bool,
    repeat: bool,
    /// Failures since a source last produced audio
    consecutive_failures: usize,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(mut backend: B, volume: f32, shuffle: bool, repeat: bool) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        backend.set_volume(volume);
        Self {
            backend,
            status: PlaybackStatus::Idle,
            current: None,
            generation: 0,
            position: Duration::ZERO,
            duration: None,
            seek_preview: None,
            volume,
            shuffle,
            repeat,
            consecutive_failures: 0,
        }
    }

    /// Open `track` and start playing it, from any state.
    ///
    /// On failure the controller is left Idle.
    pub fn play(&mut self, track: &TrackWithRelations) -> Result<(), PlayerError> {
        self.generation += 1;
        self.position = Duration::ZERO;
        self.duration = None;
        self.seek_preview = None;

        let path = track.path_buf();
        let opened = if path.is_file() {
            self.backend.open(&path, self.generation)
        } else {
            Err(PlayerError::FileNotFound(track.path.clone()))
        };

        if let Err(e) = opened {
            tracing::warn!(target: "godless_player::player::controller", track_id = track.id, error = %e, "Failed to open track");
            self.backend.stop();
            self.status = PlaybackStatus::Idle;
            self.current = None;
            self.consecutive_failures += 1;
            return Err(e);
        }

        self.backend.set_volume(self.volume);
        self.backend.play();
        self.status = PlaybackStatus::Playing;
        self.current = Some(track.clone());
        tracing::info!(target: "godless_player::player::controller", track_id = track.id, generation = self.generation, "Playing");
        Ok(())
    }

    /// Playing -> Paused. Stops the polling timer.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.backend.pause();
            self.position = self.backend.position();
            self.status = PlaybackStatus::Paused;
            tracing::debug!(target: "godless_player::player::controller", "Paused");
        }
    }

    /// Paused -> Playing. Restarts the polling timer.
    pub fn resume(&mut self) {
        if self.status == PlaybackStatus::Paused {
            self.backend.play();
            self.status = PlaybackStatus::Playing;
            tracing::debug!(target: "godless_player::player::controller", "Resumed");
        }
    }

    /// Toggle between Playing and Paused. No-op while Idle.
    pub fn toggle(&mut self) {
        match self.status {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Idle => {}
        }
    }

    /// Drop the loaded track and go Idle.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.generation += 1;
        self.status = PlaybackStatus::Idle;
        self.current = None;
        self.position = Duration::ZERO;
        self.duration = None;
        self.seek_preview = None;
    }

    /// Single dispatch point for backend notifications and timer ticks.
    pub fn dispatch(&mut self, event: PlayerEvent) -> FollowUp {
        match event {
            PlayerEvent::Opened {
                generation,
                duration,
            } => {
                if generation != self.generation {
                    tracing::trace!(target: "godless_player::player::controller", generation, "Ignoring stale open");
                    return FollowUp::None;
                }
                self.duration = duration;
                self.position = Duration::ZERO;
                tracing::debug!(target: "godless_player::player::controller", ?duration, "Source opened");
                FollowUp::None
            }
            PlayerEvent::Ended { generation } => {
                if generation != self.generation || self.status == PlaybackStatus::Idle {
                    return FollowUp::None;
                }
                self.status = PlaybackStatus::Idle;
                self.consecutive_failures = 0;
                if let Some(d) = self.duration {
                    self.position = d;
                }
                if self.repeat {
                    FollowUp::Replay
                } else {
                    FollowUp::Advance
                }
            }
            PlayerEvent::Failed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    return FollowUp::None;
                }
                tracing::warn!(target: "godless_player::player::controller", %message, "Playback failed");
                self.backend.stop();
                self.status = PlaybackStatus::Idle;
                self.current = None;
                self.consecutive_failures += 1;
                FollowUp::Skip(message)
            }
            PlayerEvent::Tick => {
                if self.status == PlaybackStatus::Playing && self.seek_preview.is_none() {
                    self.position = self.backend.position();
                    // Audio came out, so the current source is known to be playable
                    if !self.position.is_zero() {
                        self.consecutive_failures = 0;
                    }
                }
                while let Some(event) = self.backend.poll_event() {
                    let follow_up = self.dispatch(event);
                    if follow_up != FollowUp::None {
                        return follow_up;
                    }
                }
                FollowUp::None
            }
        }
    }

    /// Update the displayed time while the seek slider is dragged.
    pub fn seek_preview(&mut self, seconds: f32) {
        self.seek_preview = Some(Duration::from_secs_f32(seconds.max(0.0)));
    }

    /// Apply the dragged position once the slider is released.
    ///
    /// Ignored unless a track is loaded and its duration is known.
    pub fn seek_release(&mut self) -> Result<(), PlayerError> {
        let Some(target) = self.seek_preview.take() else {
            return Ok(());
        };
        let Some(duration) = self.duration.filter(|d| !d.is_zero()) else {
            return Ok(());
        };
        if self.status == PlaybackStatus::Idle {
            return Ok(());
        }

        let target = target.min(duration);
        self.backend.seek(target)?;
        self.position = target;
        tracing::debug!(target: "godless_player::player::controller", position = ?target, "Seek");
        Ok(())
    }

    /// Set the volume, clamped into 0.0 - 1.0, and apply it immediately.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// The polling timer runs exactly while Playing.
    pub fn timer_active(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// The loaded track.
    pub fn current_track(&self) -> Option<&TrackWithRelations> {
        self.current.as_ref()
    }

    /// Refresh the loaded track's details after an edit.
    pub fn refresh_track(&mut self, track: &TrackWithRelations) {
        if let Some(current) = &mut self.current
            && current.id == track.id
        {
            *current = track.clone();
        }
    }

    /// True while another skip after a failure may still find a playable
    /// track, i.e. fewer than `library_len` tracks have failed in a row.
    pub fn may_skip(&self, library_len: usize) -> bool {
        self.consecutive_failures < library_len
    }

    /// Forget the failure streak (on an explicit user action).
    pub fn reset_failures(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Snapshot for the views.
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            status: self.status,
            track_id: self.current.as_ref().map(|t| t.id),
            now_playing: self
                .current
                .as_ref()
                .map(now_playing_label)
                .unwrap_or_default(),
            position: self.seek_preview.unwrap_or(self.position),
            duration: self.duration,
            volume: self.volume,
            shuffle: self.shuffle,
            repeat: self.repeat,
            seeking: self.seek_preview.is_some(),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Player errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("Audio output initialization failed: {0}")]
    AudioInit(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open: {0}")]
    Open(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Seek failed: {0}")]
    Seek(String),
}
