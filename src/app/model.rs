//! Application model types: `App`, `InputMode`, `Button` and `Hitboxes`.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::audio::Command;
use crate::config::Settings;

use super::deck::DeckAnimation;
use super::input::Action;
use super::slider::Slider;

/// Whether keys drive the player or fill the add-songs prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    AddSongs(String),
}

/// Transport buttons under the deck.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    Previous,
    PlayPause,
    Stop,
    Next,
    Loop,
    AddSongs,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Previous,
        Button::PlayPause,
        Button::Stop,
        Button::Next,
        Button::Loop,
        Button::AddSongs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::Previous => "⏮ prev",
            Button::PlayPause => "⏯ play",
            Button::Stop => "⏹ stop",
            Button::Next => "⏭ next",
            Button::Loop => "↻ loop",
            Button::AddSongs => "+ add",
        }
    }

    pub fn action(self) -> Action {
        match self {
            Button::Previous => Action::Player(Command::Previous),
            Button::PlayPause => Action::Player(Command::TogglePlayPause),
            Button::Stop => Action::Player(Command::Stop),
            Button::Next => Action::Player(Command::Next),
            Button::Loop => Action::Player(Command::CycleLoopMode),
            Button::AddSongs => Action::AddSongs,
        }
    }
}

/// Clickable regions of the last drawn frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hitboxes {
    pub progress: Rect,
    pub volume: Rect,
    pub buttons: Vec<(Button, Rect)>,
}

/// The presentation model.
pub struct App {
    pub selected: usize,
    pub input: InputMode,
    pub status: Option<String>,
    pub deck: DeckAnimation,
    pub progress: Slider,
    pub volume: Slider,
    buttons: Vec<(Button, Rect)>,
    /// Button under the pointer when the left button went down.
    pressed: Option<Button>,
    /// Coordinator track seen on the previous frame: index and start count.
    last_track: Option<(Option<usize>, u64)>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            selected: 0,
            input: InputMode::Normal,
            status: None,
            deck: DeckAnimation::new(settings.ui.scroll_speed),
            progress: Slider::new(0.0),
            volume: Slider::new(f64::from(settings.audio.volume)),
            buttons: Vec::new(),
            pressed: None,
            last_track: None,
        }
    }

    /// Per-frame update from the coordinator's state.
    ///
    /// `starts` is the coordinator's track start count. Whenever a track
    /// (re)starts the cursor moves to it and the marquee restarts.
    pub fn advance(
        &mut self,
        playing: bool,
        current: Option<usize>,
        starts: u64,
        progress: f64,
        volume: f32,
    ) {
        let track = Some((current, starts));
        if track != self.last_track {
            if let Some(i) = current {
                self.selected = i;
            }
            self.deck.reset_marquee();
            self.last_track = track;
        }
        self.deck.advance(playing);
        self.progress.sync(progress);
        self.volume.sync(f64::from(volume));
    }

    pub fn set_hitboxes(&mut self, hitboxes: Hitboxes) {
        self.progress.set_area(hitboxes.progress);
        self.volume.set_area(hitboxes.volume);
        self.buttons = hitboxes.buttons;
    }

    /// Button held down right now, for the pressed overlay.
    pub fn pressed(&self) -> Option<Button> {
        self.pressed
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<Button> {
        let pos = Position::new(x, y);
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(b, _)| *b)
    }

    /// Move the cursor down, wrapping from the last row to the first.
    pub fn cursor_down(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + 1) % len;
    }

    /// Move the cursor up, wrapping from the first row to the last.
    pub fn cursor_up(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + len - 1) % len;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn begin_add_songs(&mut self) {
        self.input = InputMode::AddSongs(String::new());
    }

    pub fn push_input_char(&mut self, c: char) {
        if let InputMode::AddSongs(buf) = &mut self.input {
            buf.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let InputMode::AddSongs(buf) = &mut self.input {
            buf.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Normal;
    }

    /// Close the prompt and return what was typed, trimmed. `None` when the
    /// prompt was not open or left blank.
    pub fn take_input(&mut self) -> Option<String> {
        match std::mem::take(&mut self.input) {
            InputMode::AddSongs(buf) => {
                let trimmed = buf.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            InputMode::Normal => None,
        }
    }

    /// Translate a mouse event into an action against the last drawn frame.
    ///
    /// The volume slider applies while dragging; the progress slider only
    /// seeks when released. Buttons fire on release, and only when the
    /// pointer is still over the button that was pressed.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<Action> {
        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(v) = self.volume.press(x, y) {
                    return Some(Action::Player(Command::SetVolume(v as f32)));
                }
                if self.progress.press(x, y).is_some() {
                    return None;
                }
                self.pressed = self.button_at(x, y);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(v) = self.volume.drag(x) {
                    return Some(Action::Player(Command::SetVolume(v as f32)));
                }
                self.progress.drag(x);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.volume.release();
                if let Some(v) = self.progress.release() {
                    self.pressed = None;
                    return Some(Action::Player(Command::SeekFraction(v)));
                }
                let pressed = self.pressed.take()?;
                (self.button_at(x, y) == Some(pressed)).then(|| pressed.action())
            }
            _ => None,
        }
    }
}
