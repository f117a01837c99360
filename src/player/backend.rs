//! Media backends: the seam between the controller and the audio output.
//!
//! The controller never decodes audio itself. It hands a path to a
//! [`MediaBackend`] and learns about the result through [`PlayerEvent`]s
//! polled on each timer tick.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::PlayerError;

/// Events delivered to [`super::PlaybackController::dispatch`].
///
/// Each opened source carries a generation number so notifications from a
/// previously opened source can be told apart from the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The source is open; `duration` is `None` when it could not be determined
    Opened {
        generation: u64,
        duration: Option<Duration>,
    },
    /// Playback reached the end of the source
    Ended { generation: u64 },
    /// The source could not be played
    Failed { generation: u64, message: String },
    /// Polling timer tick
    Tick,
}

/// Platform media service used by the controller.
pub trait MediaBackend {
    /// Open a source, leaving it paused. Replaces any previous source.
    ///
    /// Completion is reported later as [`PlayerEvent::Opened`] with the
    /// same `generation`.
    fn open(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Drop the current source.
    fn stop(&mut self);

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError>;

    fn set_volume(&mut self, volume: f32);

    /// Current playback position of the open source.
    fn position(&self) -> Duration;

    /// Next pending event, if any (non-blocking).
    fn poll_event(&mut self) -> Option<PlayerEvent>;
}

/// Media backend on top of rodio's default output stream.
pub struct RodioBackend {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    generation: u64,
    ended_reported: bool,
    events_tx: Sender<PlayerEvent>,
    events_rx: Receiver<PlayerEvent>,
}

impl RodioBackend {
    /// Open the default audio output device.
    pub fn new() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::AudioInit(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped
        stream.log_on_drop(false);

        let (events_tx, events_rx) = unbounded();
        tracing::info!(target: "godless_player::player::backend", "Audio output opened");

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
            generation: 0,
            ended_reported: false,
            events_tx,
            events_rx,
        })
    }
}

impl MediaBackend for RodioBackend {
    fn open(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError> {
        self.stop();

        let file = File::open(path)
            .map_err(|e| PlayerError::Open(format!("{}: {}", path.display(), e)))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::Decode(format!("{}: {}", path.display(), e)))?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();

        self.sink = Some(sink);
        self.generation = generation;
        self.ended_reported = false;

        // Duration becomes known asynchronously, like a platform "media opened" callback
        let tx = self.events_tx.clone();
        let path: PathBuf = path.to_path_buf();
        thread::spawn(move || {
            let duration = probe_duration(&path);
            let _ = tx.send(PlayerEvent::Opened {
                generation,
                duration,
            });
        });

        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        sink.try_seek(position)
            .map_err(|e| PlayerError::Seek(e.to_string()))
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        if let Ok(event) = self.events_rx.try_recv() {
            return Some(event);
        }

        let sink = self.sink.as_ref()?;
        if self.ended_reported || !sink.empty() {
            return None;
        }
        self.ended_reported = true;

        // A source that finishes without producing any audio never really played
        if sink.get_pos().is_zero() {
            return Some(PlayerEvent::Failed {
                generation: self.generation,
                message: "no audio could be decoded".to_string(),
            });
        }
        Some(PlayerEvent::Ended {
            generation: self.generation,
        })
    }
}

/// Read the total duration from the file's audio properties.
fn probe_duration(path: &Path) -> Option<Duration> {
    use lofty::file::AudioFile;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let duration = tagged.properties().duration();
            (!duration.is_zero()).then_some(duration)
        }
        Err(e) => {
            tracing::debug!(target: "godless_player::player::backend", path = %path.display(), error = %e, "Duration probe failed");
            None
        }
    }
}
