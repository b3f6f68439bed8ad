//! Application model types: `App` and `PlaybackState`.
//!
//! `App` is the view the playback session renders into. The UI draws from
//! it and the runtime reads it to keep MPRIS in sync.

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::{PlayMode, View};
use crate::error::PlayerError;
use crate::playlist::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub track: Option<Track>,
    pub progress_percent: f64,
    pub elapsed: Duration,
    pub playing: bool,
    /// Last state the media engine itself reported, for the status line.
    pub media_paused: bool,
    pub play_mode: PlayMode,
    pub last_error: Option<String>,
    pub playlist_path: Option<PathBuf>,

    // Set whenever something MPRIS cares about changes.
    changed: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the playlist was loaded from (shown in the status line).
    pub fn set_playlist_path(&mut self, path: PathBuf) {
        self.playlist_path = Some(path);
    }

    pub fn playback_state(&self) -> PlaybackState {
        match (&self.track, self.playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Return and clear the "changed" flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Total length of the current track, zero when nothing is loaded.
    pub fn total(&self) -> Duration {
        self.track.as_ref().map_or(Duration::ZERO, |t| t.duration)
    }
}

impl View for App {
    fn render_track(&mut self, track: &Track) {
        self.track = Some(track.clone());
        self.changed = true;
    }

    fn update_progress(&mut self, percent: f64, elapsed: Duration) {
        self.progress_percent = percent;
        self.elapsed = elapsed;
    }

    fn on_play_state_changed(&mut self, playing: bool) {
        if playing {
            self.last_error = None;
        }
        if self.playing != playing {
            self.changed = true;
        }
        self.playing = playing;
    }

    fn on_play_mode_changed(&mut self, mode: PlayMode) {
        self.play_mode = mode;
        self.changed = true;
    }

    fn on_media_playing(&mut self) {
        self.media_paused = false;
    }

    fn on_media_paused(&mut self) {
        self.media_paused = true;
    }

    fn on_error(&mut self, error: &PlayerError) {
        self.last_error = Some(error.to_string());
    }
}
