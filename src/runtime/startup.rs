use std::path::Path;

use tracing::warn;

use crate::app::App;
use crate::audio::{Clock, MediaEngine, PlayMode, PlaybackSession};
use crate::config::{self, PlayModeSetting};
use crate::error::PlayerError;
use crate::playlist::load_playlist;

pub fn play_mode_from(setting: PlayModeSetting) -> PlayMode {
    match setting {
        PlayModeSetting::RepeatAll => PlayMode::RepeatAll,
        PlayModeSetting::RepeatOne => PlayMode::RepeatOne,
        PlayModeSetting::Shuffle => PlayMode::Shuffle,
    }
}

/// Apply configured defaults, load the playlist and optionally start playing.
///
/// A playlist that cannot be loaded is returned as an error. An autoplay
/// failure has already been shown by the session and is not.
pub fn start_session<E: MediaEngine, C: Clock>(
    session: &mut PlaybackSession<E, C, App>,
    playlist: &Path,
    settings: &config::Settings,
) -> Result<(), PlayerError> {
    session.set_play_mode(play_mode_from(settings.playback.play_mode));

    let tracks = load_playlist(playlist)?;
    session.load(tracks)?;

    if settings.playback.autoplay {
        if let Err(e) = session.play() {
            warn!(error = %e, "autoplay failed");
        }
    }
    Ok(())
}
