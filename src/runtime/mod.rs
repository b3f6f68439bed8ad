use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::{PlaybackSession, PlayerEvent, RodioEngine, ThreadClock};
use crate::mpris::ControlCmd;

mod actions;
mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub type Session = PlaybackSession<RodioEngine, ThreadClock, App>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init_logging(&settings.logging);

    let playlist_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.playlist.path.clone());
    info!(playlist = %playlist_path.display(), "starting");

    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let engine = RodioEngine::open(event_tx.clone())?;
    let clock = ThreadClock::new(event_tx);

    let mut app = App::new();
    app.set_playlist_path(playlist_path.clone());
    let mut session: Session = PlaybackSession::new(
        engine,
        clock,
        app,
        Duration::from_millis(settings.playback.sample_interval_ms),
    );

    startup::start_session(&mut session, &playlist_path, &settings)?;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &session);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut session,
            &mpris,
            &control_rx,
            &event_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
