use super::*;
use crate::playlist::TrackId;
use std::path::PathBuf;
use std::sync::mpsc;

fn make_track() -> Track {
    Track {
        id: TrackId::Number(3),
        title: "Test Title".to_string(),
        artist: "Test Artist".to_string(),
        source: PathBuf::from("/tmp/music/test.mp3"),
        artwork: Some("/tmp/music/cover.jpg".to_string()),
        icon: None,
        duration: Duration::from_micros(1_234_000_000),
    }
}

fn handle_with(state: &Arc<Mutex<SharedState>>) -> (MprisHandle, Receiver<()>) {
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    (
        MprisHandle {
            state: state.clone(),
            notify: notify_tx,
        },
        notify_rx,
    )
}

fn player(state: &Arc<Mutex<SharedState>>) -> PlayerIface {
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    PlayerIface {
        tx,
        state: state.clone(),
    }
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (handle, notify) = handle_with(&state);

    let track = make_track();
    handle.set_track_metadata(Some(7), Some(&track));
    assert!(notify.try_recv().is_ok());

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.art_url.as_deref(), Some("/tmp/music/cover.jpg"));
        assert_eq!(s.length_micros, Some(1_234_000_000));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = player(&state);
    let (handle, _notify) = handle_with(&state);

    assert_eq!(iface.playback_status(), "Stopped");
    handle.set_playback(PlaybackState::Playing);
    assert_eq!(iface.playback_status(), "Playing");
    handle.set_playback(PlaybackState::Paused);
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn play_mode_maps_to_loop_status_and_shuffle() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = player(&state);
    let (handle, _notify) = handle_with(&state);

    assert_eq!(iface.loop_status(), "Playlist");
    assert!(!iface.shuffle());

    handle.set_play_mode(PlayMode::RepeatOne);
    assert_eq!(iface.loop_status(), "Track");
    assert!(!iface.shuffle());

    handle.set_play_mode(PlayMode::Shuffle);
    assert_eq!(iface.loop_status(), "Playlist");
    assert!(iface.shuffle());
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = player(&state);
    let (handle, _notify) = handle_with(&state);
    handle.set_track_metadata(Some(1), Some(&make_track()));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_without_track_only_has_empty_title() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let map = player(&state).metadata();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("xesam:title"));
}

#[test]
fn transport_methods_forward_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.next();
    iface.previous();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
        ]
    );
}
