use std::time::Duration;

use crate::error::PlayerError;
use crate::playlist::Track;

use super::types::PlayMode;

/// Receiver of everything the session wants shown.
///
/// The session only pushes into the view and never reads it back.
pub trait View {
    fn render_track(&mut self, track: &Track);
    fn update_progress(&mut self, percent: f64, elapsed: Duration);
    fn on_play_state_changed(&mut self, playing: bool);
    fn on_play_mode_changed(&mut self, mode: PlayMode);

    /// Cosmetic: the engine reported that playback started.
    fn on_media_playing(&mut self) {}
    /// Cosmetic: the engine reported that playback paused.
    fn on_media_paused(&mut self) {}

    fn on_error(&mut self, _error: &PlayerError) {}
}
