//! Media engine abstraction and its `rodio` implementation.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::MediaError;
use crate::playlist::Track;

use super::sink::create_sink_at;
use super::types::{MediaEvent, MediaEventKind, PlayerEvent};

/// Playback primitive driven by the session.
///
/// Implementations report lifecycle changes asynchronously as
/// `PlayerEvent::Media` tagged with the generation passed to `load`.
pub trait MediaEngine {
    /// Replace the current source with `track`, paused at the start.
    fn load(&mut self, track: &Track, generation: u64) -> Result<(), MediaError>;
    /// Reposition the loaded source, keeping its paused/playing state.
    fn seek(&mut self, position: Duration) -> Result<(), MediaError>;
    /// Start or resume the loaded source.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    /// Elapsed time into the loaded source.
    fn position(&self) -> Duration;
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;
    /// Restart the source natively when it ends instead of reporting `Ended`.
    fn set_looping(&mut self, looping: bool);
    /// Give the engine a chance to notice state changes (end of source).
    fn poll(&mut self) {}
}

pub struct RodioEngine {
    stream: OutputStream,
    events: Sender<PlayerEvent>,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    generation: u64,
    paused: bool,
    ended: bool,
    looping: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open(events: Sender<PlayerEvent>) -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            events,
            sink: None,
            source: None,
            generation: 0,
            paused: true,
            ended: false,
            looping: false,
            started_at: None,
            accumulated: Duration::ZERO,
        })
    }

    fn emit(&self, kind: MediaEventKind) {
        let _ = self.events.send(PlayerEvent::Media(MediaEvent {
            kind,
            generation: self.generation,
        }));
    }

    /// Rebuild the sink for the current source at `at`, keeping paused state.
    fn rebuild(&mut self, at: Duration) -> Result<(), MediaError> {
        let path = self.source.as_ref().ok_or(MediaError::NoSource)?;
        let sink = create_sink_at(&self.stream, path, at)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if self.paused {
            self.started_at = None;
        } else {
            sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = Some(sink);
        self.accumulated = at;
        self.ended = false;
        Ok(())
    }

    fn settle_elapsed(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, track: &Track, generation: u64) -> Result<(), MediaError> {
        let sink = create_sink_at(&self.stream, &track.source, Duration::ZERO)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(sink);
        self.source = Some(track.source.clone());
        self.generation = generation;
        self.paused = true;
        self.ended = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        debug!(generation, source = %track.source.display(), "source loaded");
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.rebuild(position)
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.sink.is_none() {
            return Err(MediaError::NoSource);
        }
        if self.ended {
            self.rebuild(Duration::ZERO)?;
        }
        if self.paused {
            if let Some(sink) = self.sink.as_ref() {
                sink.play();
            }
            self.paused = false;
            self.started_at = Some(Instant::now());
        }
        self.emit(MediaEventKind::Started);
        Ok(())
    }

    fn pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }
        sink.pause();
        self.settle_elapsed();
        self.paused = true;
        self.emit(MediaEventKind::Paused);
    }

    fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn is_paused(&self) -> bool {
        self.paused || self.sink.is_none()
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn poll(&mut self) {
        let drained = match self.sink.as_ref() {
            Some(s) => !self.paused && !self.ended && s.empty(),
            None => false,
        };
        if !drained {
            return;
        }

        if self.looping {
            debug!(generation = self.generation, "source drained, looping");
            match self.rebuild(Duration::ZERO) {
                Ok(()) => return,
                Err(e) => warn!(error = %e, "failed to loop source"),
            }
        }

        self.settle_elapsed();
        self.paused = true;
        self.ended = true;
        self.emit(MediaEventKind::Ended);
    }
}
