//! Keyboard mapping for normal mode.

use crossterm::event::KeyCode;

use crate::audio::Command;
use crate::config::ControlsSettings;

/// What a key press or click asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Forward to the playback coordinator.
    Player(Command),
    CursorUp,
    CursorDown,
    /// Start the track under the playlist cursor.
    PlaySelected,
    /// Open the add-songs prompt.
    AddSongs,
    Quit,
}

/// Map a key in normal mode. `volume` is the coordinator's current level.
pub fn key_action(code: KeyCode, controls: &ControlsSettings, volume: f32) -> Option<Action> {
    let scrub = i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX);

    let action = match code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Player(Command::TogglePlayPause),
        KeyCode::Char('l') | KeyCode::Char('n') => Action::Player(Command::Next),
        KeyCode::Char('h') | KeyCode::Char('b') => Action::Player(Command::Previous),
        KeyCode::Char('L') => Action::Player(Command::SeekBy(scrub)),
        KeyCode::Char('H') => Action::Player(Command::SeekBy(-scrub)),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Action::Player(Command::SetVolume(volume + controls.volume_step))
        }
        KeyCode::Char('-') => Action::Player(Command::SetVolume(volume - controls.volume_step)),
        KeyCode::Char('r') => Action::Player(Command::CycleLoopMode),
        KeyCode::Char('s') => Action::Player(Command::Stop),
        KeyCode::Char('a') => Action::AddSongs,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}
