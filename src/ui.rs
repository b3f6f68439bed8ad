//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the geometry the runtime needs to map mouse clicks onto the progress bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Stylize,
    text::{Line, Text},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, PlaybackState};
use crate::config::{ControlsSettings, UiSettings};
use crate::playlist::display_from_fields;
use crate::time::format_mmss;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("r".to_string(), "play mode".to_string());
    map.insert("0-9".to_string(), "jump to 0-90%".to_string());
    map.insert("click".to_string(), "seek".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the scrub step.
fn controls_text(scrub_percent: f64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["space/p", "h/l", "H/L", "r", "0-9", "click", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}%", scrub_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area)
}

/// Area occupied by the progress bar (borders included) for a frame of `area`.
pub fn progress_bar_area(area: Rect) -> Rect {
    layout(area)[2]
}

/// Map a click at (`column`, `row`) onto the progress bar drawn in `bar`.
///
/// Returns the percentage of the track the click points at, or `None` if
/// the click landed outside the bar's interior.
pub fn percent_at(bar: Rect, column: u16, row: u16) -> Option<f64> {
    let inner = Rect {
        x: bar.x.saturating_add(1),
        y: bar.y.saturating_add(1),
        width: bar.width.saturating_sub(2),
        height: bar.height.saturating_sub(2),
    };
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let span = f64::from(inner.width.saturating_sub(1).max(1));
    let offset = f64::from(column - inner.x);
    Some((offset / span * 100.0).clamp(0.0, 100.0))
}

fn now_playing_text(app: &App, ui: &UiSettings) -> Text<'static> {
    let Some(track) = app.track.as_ref() else {
        return Text::from("Nothing loaded");
    };

    let mut song = display_from_fields(track, &ui.now_playing_fields, &ui.now_playing_separator);
    if song.trim().is_empty() {
        song = track.display();
    }

    let mut lines = vec![Line::from(song).bold()];
    if let Some(art) = track.artwork.as_deref() {
        lines.push(Line::from(format!("Art: {}", art)).dim());
    }
    Text::from(lines)
}

fn status_text(app: &App) -> Text<'static> {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("PLAYBACK: {}", app.play_mode.label()));

    let state = match app.playback_state() {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    };
    parts.push(state.to_string());

    // The engine paused underneath us (device change etc.).
    if app.playing && app.media_paused {
        parts.push("Output: paused".to_string());
    }

    if let Some(path) = &app.playlist_path {
        parts.push(format!("Playlist: {}", path.display()));
    }

    let mut lines = vec![Line::from(parts.join(" • "))];
    if let Some(err) = &app.last_error {
        lines.push(Line::from(format!("Error: {}", err)).red());
    }
    Text::from(lines)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = layout(frame.area());
    let pad = Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    };

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now_playing = Paragraph::new(now_playing_text(app, ui_settings))
        .block(Block::bordered().padding(pad).title(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    let ratio = (app.progress_percent / 100.0).clamp(0.0, 1.0);
    let label = format!("{} / {}", format_mmss(app.elapsed), format_mmss(app.total()));
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .ratio(if ratio.is_nan() { 0.0 } else { ratio })
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    let status = Paragraph::new(status_text(app))
        .block(Block::bordered().padding(pad).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[3]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_percent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(pad),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PlayMode, View};
    use crate::error::{MediaError, PlayerError};
    use crate::playlist::{Track, TrackId};
    use ratatui::{Terminal, backend::TestBackend};
    use std::path::PathBuf;
    use std::time::Duration;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|f| draw(f, app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn percent_at_maps_interior_columns() {
        let bar = Rect::new(0, 10, 22, 3);
        assert_eq!(percent_at(bar, 1, 11), Some(0.0));
        assert_eq!(percent_at(bar, 20, 11), Some(100.0));
        let mid = percent_at(bar, 10, 11).unwrap();
        assert!(mid > 40.0 && mid < 50.0, "{mid}");
    }

    #[test]
    fn percent_at_ignores_borders_and_outside() {
        let bar = Rect::new(0, 10, 22, 3);
        assert_eq!(percent_at(bar, 0, 11), None);
        assert_eq!(percent_at(bar, 21, 11), None);
        assert_eq!(percent_at(bar, 5, 10), None);
        assert_eq!(percent_at(bar, 5, 12), None);
        assert_eq!(percent_at(Rect::new(0, 0, 2, 2), 1, 1), None);
    }

    #[test]
    fn progress_bar_sits_below_now_playing() {
        let bar = progress_bar_area(Rect::new(0, 0, 80, 24));
        assert_eq!(bar, Rect::new(0, 7, 80, 3));
    }

    #[test]
    fn controls_text_includes_scrub_step() {
        let text = controls_text(7.5);
        assert!(text.contains("[H/L] scrub -/+7.5%"));
        assert!(text.starts_with("[space/p] play/pause"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn draw_shows_track_time_mode_and_error() {
        let mut app = App::new();
        app.render_track(&Track {
            id: TrackId::Number(1),
            title: "Song".into(),
            artist: "Band".into(),
            source: PathBuf::from("/m/song.mp3"),
            artwork: None,
            icon: None,
            duration: Duration::from_secs(180),
        });
        app.update_progress(25.0, Duration::from_secs(45));
        app.on_play_mode_changed(PlayMode::Shuffle);
        app.on_error(&PlayerError::PlaybackFailed {
            track: "Band - Song".into(),
            source: MediaError::Output("device busy".into()),
        });

        let screen = rendered(&app);
        assert!(screen.contains("Band - Song"));
        assert!(screen.contains("00:45 / 03:00"));
        assert!(screen.contains("Shuffle play"));
        assert!(screen.contains("Paused"));
        assert!(screen.contains("Error: playback failed"));
    }

    #[test]
    fn draw_without_track_says_so() {
        let screen = rendered(&App::new());
        assert!(screen.contains("Nothing loaded"));
        assert!(screen.contains("00:00 / 00:00"));
        assert!(screen.contains("Stopped"));
    }
}
