use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App, Hitboxes, InputMode, key_action};
use crate::audio::{AudioBackend, Coordinator, PlaybackState};
use crate::config;
use crate::library::LoftyReader;
use crate::runtime::startup;
use crate::ui;

/// Whether the loop should keep going after an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

/// Main terminal loop at `ui.fps`: tick the coordinator, animate, draw, then
/// drain input until the frame budget is spent. Returns `Ok(())` on quit.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Coordinator<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(settings.ui.fps.max(1)));

    loop {
        let started = Instant::now();

        player.on_tick();
        app.advance(
            player.state() == PlaybackState::Playing,
            player.current_index(),
            player.track_starts(),
            player.progress(),
            player.volume(),
        );

        let mut hitboxes = Hitboxes::default();
        terminal.draw(|f| hitboxes = ui::draw(f, app, player, settings))?;
        app.set_hitboxes(hitboxes);

        let flow = pump_events(
            started + frame,
            |timeout| {
                if event::poll(timeout)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            },
            |ev| handle_event(ev, settings, app, player),
        )?;
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

/// Feed events to `handle` until `deadline`, so every frame lasts its full
/// budget however much input arrives. Stops early only on `Flow::Quit`.
pub(super) fn pump_events(
    deadline: Instant,
    mut poll: impl FnMut(Duration) -> io::Result<Option<Event>>,
    mut handle: impl FnMut(Event) -> Flow,
) -> io::Result<Flow> {
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match poll(remaining)? {
            Some(ev) => {
                if handle(ev) == Flow::Quit {
                    return Ok(Flow::Quit);
                }
            }
            None => break,
        }
    }
    Ok(Flow::Continue)
}

fn handle_event<B: AudioBackend>(
    event: Event,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Coordinator<B>,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if matches!(app.input, InputMode::AddSongs(_)) {
                handle_prompt_key(key, settings, app, player);
                return Flow::Continue;
            }
            match key_action(key.code, &settings.controls, player.volume()) {
                Some(action) => apply(action, app, player),
                None => Flow::Continue,
            }
        }
        Event::Mouse(mouse) => match app.handle_mouse(mouse) {
            Some(action) => apply(action, app, player),
            None => Flow::Continue,
        },
        _ => Flow::Continue,
    }
}

fn handle_prompt_key<B: AudioBackend>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Coordinator<B>,
) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Enter => match app.take_input() {
            Some(input) => {
                let home = std::env::var_os("HOME").map(PathBuf::from);
                let path = startup::expand_home(&input, home.as_deref());
                startup::load_tracks(player, app, &[path], &settings.library, &LoftyReader);
            }
            None => app.set_status("no path entered"),
        },
        KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
        _ => {}
    }
}

fn apply<B: AudioBackend>(action: Action, app: &mut App, player: &mut Coordinator<B>) -> Flow {
    match action {
        Action::Player(cmd) => player.handle(cmd),
        Action::CursorUp => app.cursor_up(player.tracks().len()),
        Action::CursorDown => app.cursor_down(player.tracks().len()),
        Action::PlaySelected => player.play_at(app.selected),
        Action::AddSongs => app.begin_add_songs(),
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}
