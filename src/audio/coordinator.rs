//! Playback coordinator: owns the playlist, the play state and the loop/volume
//! settings, and turns transport commands into backend calls.
//!
//! Everything here runs on the frame-loop thread. Track ends are detected by
//! polling in [`Coordinator::on_tick`]; the `end_consumed` flag makes sure a
//! finished track triggers exactly one transition.

use std::time::Duration;

use crate::library::Track;

use super::backend::AudioBackend;
use super::playlist::Playlist;
use super::types::{Command, LoopMode, PlaybackState};

pub struct Coordinator<B: AudioBackend> {
    backend: B,
    handle: Option<B::Handle>,
    playlist: Playlist,
    state: PlaybackState,
    loop_mode: LoopMode,
    volume: f32,
    /// Last position requested through `seek`; also the start offset for a
    /// stopped track's next `play`.
    position: Duration,
    end_consumed: bool,
    /// Successful track starts so far, so observers can tell a restart from
    /// a paused frame on the same index.
    starts: u64,
    last_error: Option<String>,
}

impl<B: AudioBackend> Coordinator<B> {
    pub fn new(mut backend: B, volume: f32, loop_mode: LoopMode) -> Self {
        let volume = clamp_volume(volume);
        backend.set_volume(volume);
        Self {
            backend,
            handle: None,
            playlist: Playlist::default(),
            state: PlaybackState::Stopped,
            loop_mode,
            volume,
            position: Duration::ZERO,
            end_consumed: false,
            starts: 0,
            last_error: None,
        }
    }

    /// Single entry point for presentation-issued commands.
    pub fn handle(&mut self, cmd: Command) {
        tracing::trace!(?cmd, "command");
        match cmd {
            Command::LoadPlaylist(tracks) => self.load_playlist(tracks),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::Stop => self.stop(),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::PlayAt(index) => self.play_at(index),
            Command::Seek(pos) => self.seek(pos),
            Command::SeekBy(secs) => self.seek_by(secs),
            Command::SeekFraction(f) => self.seek_fraction(f),
            Command::SetVolume(v) => self.set_volume(v),
            Command::CycleLoopMode => {
                self.cycle_loop_mode();
            }
        }
    }

    pub fn load_playlist(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        tracing::info!(count = tracks.len(), "loading playlist");
        self.release_handle();
        self.playlist.replace(tracks);
        self.start_current();
    }

    pub fn play(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        match self.state {
            PlaybackState::Playing => {}
            PlaybackState::Paused => {
                if let Some(h) = &self.handle {
                    self.backend.resume(h);
                    self.state = PlaybackState::Playing;
                } else {
                    self.start_at(self.position);
                }
            }
            PlaybackState::Stopped => self.start_at(self.position),
        }
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Some(h) = &self.handle {
            self.position = self.backend.elapsed(h);
            self.backend.pause(h);
        }
        self.state = PlaybackState::Paused;
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn stop(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        self.release_handle();
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
    }

    pub fn next(&mut self) {
        if self.playlist.advance().is_some() {
            self.start_current();
        }
    }

    pub fn previous(&mut self) {
        if self.playlist.retreat().is_some() {
            self.start_current();
        }
    }

    /// Start the track at `index`; out-of-range indices are ignored.
    pub fn play_at(&mut self, index: usize) {
        if self.playlist.select(index).is_some() {
            self.start_current();
        }
    }

    /// Jump to `position`, clamped to the current track's length. Play state is untouched.
    pub fn seek(&mut self, position: Duration) {
        let Some(track) = self.playlist.current() else {
            return;
        };
        let position = position.min(track.duration);
        self.position = position;

        if let Some(h) = &self.handle {
            if let Err(e) = self.backend.seek(h, position) {
                tracing::warn!(error = %e, "seek failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn seek_by(&mut self, secs: i64) {
        let target = if secs >= 0 {
            self.elapsed().saturating_add(Duration::from_secs(secs.unsigned_abs()))
        } else {
            self.elapsed().saturating_sub(Duration::from_secs(secs.unsigned_abs()))
        };
        self.seek(target);
    }

    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(track) = self.playlist.current() else {
            return;
        };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = track.duration.mul_f64(fraction);
        self.seek(target);
    }

    pub fn set_volume(&mut self, level: f32) {
        self.volume = clamp_volume(level);
        self.backend.set_volume(self.volume);
    }

    /// Advance the loop mode and return the new value.
    pub fn cycle_loop_mode(&mut self) -> LoopMode {
        self.loop_mode = self.loop_mode.cycle();
        tracing::debug!(mode = ?self.loop_mode, "loop mode changed");
        self.loop_mode
    }

    /// React to the current track finishing, according to the loop mode.
    pub fn on_track_end(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        match self.loop_mode {
            LoopMode::One => self.start_current(),
            LoopMode::All => self.next(),
            LoopMode::Off => {
                if self.playlist.is_last() {
                    tracing::info!("end of playlist");
                    self.release_handle();
                    self.state = PlaybackState::Stopped;
                    self.position = Duration::ZERO;
                } else {
                    self.next();
                }
            }
        }
    }

    /// Poll the backend once per frame; fires `on_track_end` once per finished track.
    pub fn on_tick(&mut self) {
        if self.state != PlaybackState::Playing || self.end_consumed {
            return;
        }
        let (Some(h), Some(track)) = (&self.handle, self.playlist.current()) else {
            return;
        };

        let finished = self.backend.is_finished(h)
            || (!track.duration.is_zero() && self.backend.elapsed(h) >= track.duration);
        if finished {
            self.end_consumed = true;
            self.on_track_end();
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn tracks(&self) -> &[Track] {
        self.playlist.tracks()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.playlist.current_index()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current()
    }

    /// Last seek target (or pause point). Zero after a track starts or stops.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Playback position of the current track, capped at its duration when known.
    pub fn elapsed(&self) -> Duration {
        let raw = match (&self.handle, self.state) {
            (Some(h), PlaybackState::Playing | PlaybackState::Paused) => self.backend.elapsed(h),
            _ => self.position,
        };
        match self.playlist.current() {
            Some(t) if !t.duration.is_zero() => raw.min(t.duration),
            _ => raw,
        }
    }

    /// Elapsed time as a fraction of the current track, `0.0` when unknown.
    pub fn progress(&self) -> f64 {
        match self.playlist.current() {
            Some(t) if !t.duration.is_zero() => {
                (self.elapsed().as_secs_f64() / t.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn track_starts(&self) -> u64 {
        self.starts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn start_current(&mut self) {
        self.start_at(Duration::ZERO);
    }

    /// Load the current track and play it from `offset`.
    ///
    /// On a load failure the index stays put, the state becomes `Stopped` and
    /// the error is kept for the status line.
    fn start_at(&mut self, offset: Duration) {
        self.release_handle();
        let Some(track) = self.playlist.current() else {
            return;
        };
        let path = track.path.clone();
        let offset = offset.min(track.duration);

        match self.backend.load(&path) {
            Ok(h) => {
                if !offset.is_zero() {
                    if let Err(e) = self.backend.seek(&h, offset) {
                        tracing::warn!(error = %e, "could not restore start position");
                    }
                }
                self.backend.play(&h);
                self.handle = Some(h);
                self.state = PlaybackState::Playing;
                self.position = Duration::ZERO;
                self.end_consumed = false;
                self.starts = self.starts.wrapping_add(1);
                self.last_error = None;
                tracing::info!(path = %path.display(), "playing");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "track is not playable");
                self.state = PlaybackState::Stopped;
                self.position = Duration::ZERO;
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn release_handle(&mut self) {
        if let Some(h) = self.handle.take() {
            self.backend.stop(&h);
        }
    }
}

fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
