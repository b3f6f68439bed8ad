use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::PlayerEvent;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::Session;
use crate::runtime::actions::{Action, apply, key_action, report};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Where the progress bar was last drawn, for mapping mouse clicks.
    pub progress_bar: Rect,
}

/// Main terminal event loop: dispatches media events and sampler ticks,
/// handles input, draws the UI and keeps MPRIS in sync. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    events: &mpsc::Receiver<PlayerEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        session.poll_media();
        while let Ok(ev) = events.try_recv() {
            let result = session.handle_event(ev);
            report(session, result);
        }

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        if session.view_mut().take_changed() {
            update_mpris(mpris, session);
        }

        terminal.draw(|f| {
            state.progress_bar = ui::progress_bar_area(f.area());
            ui::draw(f, session.view(), &settings.ui, &settings.controls);
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if apply(Action::from(cmd), session) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_action(key, settings) {
                        if apply(action, session) {
                            break;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(percent) = clicked_percent(mouse, state.progress_bar) {
                        apply(Action::SeekTo(percent), session);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn clicked_percent(mouse: MouseEvent, bar: Rect) -> Option<f64> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => ui::percent_at(bar, mouse.column, mouse.row),
        _ => None,
    }
}
