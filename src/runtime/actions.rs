//! User intents, from the keyboard or MPRIS, and their effect on the session.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::app::App;
use crate::audio::{Clock, MediaEngine, PlaybackSession, View};
use crate::config;
use crate::error::PlayerError;
use crate::mpris::ControlCmd;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Play,
    Pause,
    Toggle,
    Next,
    Prev,
    CycleMode,
    SeekBy(f64),
    SeekTo(f64),
}

impl From<ControlCmd> for Action {
    fn from(cmd: ControlCmd) -> Self {
        match cmd {
            ControlCmd::Quit => Action::Quit,
            ControlCmd::Play => Action::Play,
            ControlCmd::Pause => Action::Pause,
            ControlCmd::PlayPause => Action::Toggle,
            ControlCmd::Next => Action::Next,
            ControlCmd::Prev => Action::Prev,
        }
    }
}

pub fn key_action(key: KeyEvent, settings: &config::Settings) -> Option<Action> {
    let scrub = settings.controls.scrub_percent;
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('l') | KeyCode::Char('n') => Some(Action::Next),
        KeyCode::Char('h') | KeyCode::Char('b') => Some(Action::Prev),
        KeyCode::Char('r') | KeyCode::Char('m') => Some(Action::CycleMode),
        KeyCode::Char('L') => Some(Action::SeekBy(scrub)),
        KeyCode::Char('H') => Some(Action::SeekBy(-scrub)),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let tenth = c.to_digit(10).map_or(0.0, f64::from);
            Some(Action::SeekTo(tenth * 10.0))
        }
        _ => None,
    }
}

/// Apply `action` to the session. Returns `true` when the app should quit.
pub fn apply<E: MediaEngine, C: Clock>(
    action: Action,
    session: &mut PlaybackSession<E, C, App>,
) -> bool {
    let result = match action {
        Action::Quit => {
            let _ = session.pause();
            return true;
        }
        Action::Play => session.play(),
        Action::Pause => {
            if session.is_playing() {
                session.pause()
            } else {
                Ok(())
            }
        }
        Action::Toggle => session.toggle(),
        Action::Next => session.next(),
        Action::Prev => session.previous(),
        Action::CycleMode => {
            session.cycle_play_mode();
            Ok(())
        }
        Action::SeekBy(delta) => session.seek_by(delta),
        Action::SeekTo(percent) => session.seek_to(percent),
    };
    report(session, result);
    false
}

/// Surface errors the session did not already show.
pub fn report<E: MediaEngine, C: Clock>(
    session: &mut PlaybackSession<E, C, App>,
    result: Result<(), PlayerError>,
) {
    match result {
        Ok(()) => {}
        Err(PlayerError::PlaybackFailed { .. }) => {}
        Err(e) => {
            warn!(error = %e, "command failed");
            session.view_mut().on_error(&e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_actions() {
        let s = config::Settings::default();
        assert_eq!(key_action(key(' '), &s), Some(Action::Toggle));
        assert_eq!(key_action(key('p'), &s), Some(Action::Toggle));
        assert_eq!(key_action(key('l'), &s), Some(Action::Next));
        assert_eq!(key_action(key('h'), &s), Some(Action::Prev));
        assert_eq!(key_action(key('r'), &s), Some(Action::CycleMode));
        assert_eq!(key_action(key('q'), &s), Some(Action::Quit));
        assert_eq!(key_action(key('x'), &s), None);
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &s),
            None
        );
    }

    #[test]
    fn scrub_keys_use_configured_step() {
        let mut s = config::Settings::default();
        s.controls.scrub_percent = 2.5;
        assert_eq!(key_action(key('L'), &s), Some(Action::SeekBy(2.5)));
        assert_eq!(key_action(key('H'), &s), Some(Action::SeekBy(-2.5)));
    }

    #[test]
    fn digits_jump_to_tenths() {
        let s = config::Settings::default();
        assert_eq!(key_action(key('0'), &s), Some(Action::SeekTo(0.0)));
        assert_eq!(key_action(key('4'), &s), Some(Action::SeekTo(40.0)));
        assert_eq!(key_action(key('9'), &s), Some(Action::SeekTo(90.0)));
    }

    #[test]
    fn mpris_commands_map_to_actions() {
        assert_eq!(Action::from(ControlCmd::PlayPause), Action::Toggle);
        assert_eq!(Action::from(ControlCmd::Prev), Action::Prev);
        assert_eq!(Action::from(ControlCmd::Quit), Action::Quit);
    }
}
