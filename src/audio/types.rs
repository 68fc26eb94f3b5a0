//! Audio-related small types.
//!
//! Loop mode, playback state and the command enum the presentation layer
//! sends to the coordinator.

use std::time::Duration;

use crate::config::LoopModeSetting;
use crate::library::Track;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop after the last track.
    #[default]
    Off,
    /// Wrap around to the first track after the last.
    All,
    /// Repeat the current track when it ends.
    One,
}

impl LoopMode {
    /// `Off -> All -> One -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            LoopMode::Off => LoopMode::All,
            LoopMode::All => LoopMode::One,
            LoopMode::One => LoopMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoopMode::Off => "Loop off",
            LoopMode::All => "Loop all",
            LoopMode::One => "Loop one",
        }
    }
}

impl From<LoopModeSetting> for LoopMode {
    fn from(s: LoopModeSetting) -> Self {
        match s {
            LoopModeSetting::Off => LoopMode::Off,
            LoopModeSetting::All => LoopMode::All,
            LoopModeSetting::One => LoopMode::One,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the playlist and start its first track.
    LoadPlaylist(Vec<Track>),
    Play,
    Pause,
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    /// Start the track at this playlist index.
    PlayAt(usize),
    /// Seek to an absolute position in the current track.
    Seek(Duration),
    /// Seek relative to the current position, in seconds (positive or negative).
    SeekBy(i64),
    /// Seek to a fraction (0.0..=1.0) of the current track.
    SeekFraction(f64),
    SetVolume(f32),
    CycleLoopMode,
}
