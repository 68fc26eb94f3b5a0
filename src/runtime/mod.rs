use std::env;
use std::path::PathBuf;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{Coordinator, RodioBackend};
use crate::library::LoftyReader;
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.log);

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let backend = RodioBackend::open_default()?;
    let mut player = Coordinator::new(
        backend,
        settings.audio.volume,
        settings.playback.loop_mode.into(),
    );
    let mut app = App::new(&settings);

    if paths.is_empty() {
        app.set_status("press a to add songs");
    } else {
        startup::load_tracks(&mut player, &mut app, &paths, &settings.library, &LoftyReader);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("shutting down");
    run_result
}
