use crate::app::App;
use crate::audio::{Clock, MediaEngine, PlaybackSession};
use crate::mpris::MprisHandle;

pub fn update_mpris<E: MediaEngine, C: Clock>(
    mpris: &MprisHandle,
    session: &PlaybackSession<E, C, App>,
) {
    mpris.set_track_metadata(session.current_index(), session.current_track());
    mpris.set_playback(session.view().playback_state());
    mpris.set_play_mode(session.play_mode());
}
