use super::*;
use std::path::PathBuf;
use std::time::Duration;

use crate::audio::{PlayMode, View};
use crate::error::PlayerError;
use crate::playlist::Track;
use crate::error::MediaError;
use crate::playlist::TrackId;

fn t(title: &str) -> Track {
    Track {
        id: TrackId::Number(1),
        title: title.into(),
        artist: "Someone".into(),
        source: PathBuf::from("/tmp/a.mp3"),
        artwork: None,
        icon: None,
        duration: Duration::from_secs(120),
    }
}

#[test]
fn playback_state_follows_track_and_flag() {
    let mut app = App::new();
    assert_eq!(app.playback_state(), PlaybackState::Stopped);

    app.render_track(&t("One"));
    assert_eq!(app.playback_state(), PlaybackState::Paused);

    app.on_play_state_changed(true);
    assert_eq!(app.playback_state(), PlaybackState::Playing);
}

#[test]
fn changed_flag_is_set_by_track_mode_and_state() {
    let mut app = App::new();
    assert!(!app.take_changed());

    app.render_track(&t("One"));
    assert!(app.take_changed());
    assert!(!app.take_changed());

    app.on_play_state_changed(true);
    assert!(app.take_changed());
    app.on_play_state_changed(true);
    assert!(!app.take_changed());

    app.on_play_mode_changed(PlayMode::Shuffle);
    assert!(app.take_changed());
    assert_eq!(app.play_mode, PlayMode::Shuffle);

    // Progress alone does not concern MPRIS.
    app.update_progress(50.0, Duration::from_secs(60));
    assert!(!app.take_changed());
    assert_eq!(app.elapsed, Duration::from_secs(60));
}

#[test]
fn errors_are_shown_until_playback_starts() {
    let mut app = App::new();
    app.render_track(&t("One"));

    let err = PlayerError::PlaybackFailed {
        track: "Someone - One".into(),
        source: MediaError::NoSource,
    };
    app.on_error(&err);
    assert!(app.last_error.as_deref().unwrap().contains("Someone - One"));

    app.on_play_state_changed(false);
    assert!(app.last_error.is_some());

    app.on_play_state_changed(true);
    assert!(app.last_error.is_none());
}

#[test]
fn media_notifications_only_touch_cosmetic_flag() {
    let mut app = App::new();
    app.render_track(&t("One"));
    app.on_play_state_changed(true);

    app.on_media_paused();
    assert!(app.media_paused);
    assert!(app.playing);

    app.on_media_playing();
    assert!(!app.media_paused);
}

#[test]
fn total_is_zero_without_track() {
    let mut app = App::new();
    assert_eq!(app.total(), Duration::ZERO);
    app.render_track(&t("One"));
    assert_eq!(app.total(), Duration::from_secs(120));
}
