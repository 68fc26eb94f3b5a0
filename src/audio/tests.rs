use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::*;
use crate::error::{AudioError, Result};
use crate::library::Track;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play(usize),
    Pause(usize),
    Resume(usize),
    Stop(usize),
    Seek(usize, Duration),
    SetVolume(f32),
}

/// Records every call; elapsed/finished are driven by the test.
#[derive(Default)]
struct FakeBackend {
    calls: Vec<Call>,
    next_id: usize,
    elapsed: Duration,
    finished: bool,
    unplayable: HashSet<PathBuf>,
    /// Make every seek fail.
    fail_seek: bool,
}

impl FakeBackend {
    fn loads(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn last_call(&self) -> Option<&Call> {
        self.calls.last()
    }
}

impl AudioBackend for FakeBackend {
    type Handle = usize;

    fn load(&mut self, path: &Path) -> Result<usize> {
        self.calls.push(Call::Load(path.to_path_buf()));
        if self.unplayable.contains(path) {
            return Err(AudioError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt"),
            });
        }
        self.next_id += 1;
        self.elapsed = Duration::ZERO;
        self.finished = false;
        Ok(self.next_id)
    }

    fn play(&mut self, handle: &usize) {
        self.calls.push(Call::Play(*handle));
    }

    fn pause(&mut self, handle: &usize) {
        self.calls.push(Call::Pause(*handle));
    }

    fn resume(&mut self, handle: &usize) {
        self.calls.push(Call::Resume(*handle));
    }

    fn stop(&mut self, handle: &usize) {
        self.calls.push(Call::Stop(*handle));
    }

    fn seek(&mut self, handle: &usize, position: Duration) -> Result<()> {
        self.calls.push(Call::Seek(*handle, position));
        if self.fail_seek {
            return Err(AudioError::Seek("stream is not seekable".to_string()));
        }
        self.elapsed = position;
        Ok(())
    }

    fn set_volume(&mut self, level: f32) {
        self.calls.push(Call::SetVolume(level));
    }

    fn elapsed(&self, _handle: &usize) -> Duration {
        self.elapsed
    }

    fn is_finished(&self, _handle: &usize) -> bool {
        self.finished
    }
}

fn track(name: &str, secs: u64) -> Track {
    Track {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        title: name.to_string(),
        artist: "Artist".to_string(),
        duration: Duration::from_secs(secs),
    }
}

fn abc() -> Vec<Track> {
    vec![track("A", 5), track("B", 3), track("C", 4)]
}

fn coordinator() -> Coordinator<FakeBackend> {
    Coordinator::new(FakeBackend::default(), 0.5, LoopMode::Off)
}

fn loaded(tracks: Vec<Track>) -> Coordinator<FakeBackend> {
    let mut c = coordinator();
    c.load_playlist(tracks);
    c
}

/// Let the fake report `secs` of playback, then poll once.
fn tick_at(c: &mut Coordinator<FakeBackend>, secs: u64) {
    c.backend_mut().elapsed = Duration::from_secs(secs);
    c.on_tick();
}

#[test]
fn starts_stopped_with_defaults() {
    let c = coordinator();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.loop_mode(), LoopMode::Off);
    assert_eq!(c.current_index(), None);
    assert!(c.current_track().is_none());
    assert_eq!(c.backend().calls, vec![Call::SetVolume(0.5)]);
}

#[test]
fn load_playlist_autoplays_first_track() {
    let c = loaded(abc());
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.current_track().unwrap().title, "A");
    assert_eq!(c.backend().loads(), vec![PathBuf::from("/music/A.mp3")]);
    assert_eq!(c.backend().last_call(), Some(&Call::Play(1)));
}

#[test]
fn load_playlist_empty_is_noop() {
    let mut c = loaded(abc());
    c.next();
    c.pause();
    let calls_before = c.backend().calls.len();

    c.load_playlist(Vec::new());

    assert_eq!(c.tracks().len(), 3);
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.backend().calls.len(), calls_before);
}

#[test]
fn load_playlist_replaces_and_keeps_volume_and_loop_mode() {
    let mut c = loaded(abc());
    c.set_volume(0.8);
    c.cycle_loop_mode();
    c.next();
    c.next();

    c.load_playlist(vec![track("X", 10), track("Y", 10)]);

    assert_eq!(c.tracks().len(), 2);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.current_track().unwrap().title, "X");
    assert_eq!(c.volume(), 0.8);
    assert_eq!(c.loop_mode(), LoopMode::All);
    // The previous handle is stopped before the new one is loaded.
    assert!(c.backend().calls.contains(&Call::Stop(3)));
}

#[test]
fn next_wraps_back_to_start_after_len_steps() {
    for n in 1..=5u64 {
        let tracks: Vec<Track> = (0..n).map(|i| track(&format!("t{i}"), 10)).collect();
        let mut c = loaded(tracks);
        for _ in 0..n {
            c.next();
            assert_eq!(c.state(), PlaybackState::Playing);
        }
        assert_eq!(c.current_index(), Some(0), "playlist of {n}");
    }
}

#[test]
fn previous_from_first_wraps_to_last() {
    for n in 1..=5u64 {
        let tracks: Vec<Track> = (0..n).map(|i| track(&format!("t{i}"), 10)).collect();
        let mut c = loaded(tracks);
        c.previous();
        assert_eq!(c.current_index(), Some(n as usize - 1));
    }
}

#[test]
fn transport_on_empty_playlist_is_noop() {
    let mut c = coordinator();
    c.play();
    c.pause();
    c.next();
    c.previous();
    c.stop();
    c.seek(Duration::from_secs(3));
    c.seek_fraction(0.5);
    c.on_track_end();
    c.on_tick();

    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_index(), None);
    assert_eq!(c.position(), Duration::ZERO);
    assert_eq!(c.backend().calls, vec![Call::SetVolume(0.5)]);
}

#[test]
fn pause_then_play_resumes_same_handle() {
    let mut c = loaded(abc());
    c.pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.backend().last_call(), Some(&Call::Pause(1)));

    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.backend().last_call(), Some(&Call::Resume(1)));
    assert_eq!(c.backend().loads().len(), 1);
}

#[test]
fn play_while_playing_and_pause_while_stopped_are_noops() {
    let mut c = loaded(abc());
    let n = c.backend().calls.len();
    c.play();
    assert_eq!(c.backend().calls.len(), n);

    c.stop();
    let n = c.backend().calls.len();
    c.pause();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.backend().calls.len(), n);
}

#[test]
fn play_from_stopped_reloads_current_track() {
    let mut c = loaded(abc());
    c.next();
    c.stop();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_index(), Some(1));

    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(
        c.backend().loads().last(),
        Some(&PathBuf::from("/music/B.mp3"))
    );
}

#[test]
fn toggle_play_pause_alternates() {
    let mut c = loaded(abc());
    c.toggle_play_pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    c.toggle_play_pause();
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn next_from_paused_starts_playing() {
    let mut c = loaded(abc());
    c.pause();
    c.next();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn play_at_selects_and_starts() {
    let mut c = loaded(abc());
    c.play_at(2);
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.state(), PlaybackState::Playing);

    let n = c.backend().calls.len();
    c.play_at(7);
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.backend().calls.len(), n);
}

#[test]
fn set_volume_clamps_and_applies_immediately() {
    let mut c = loaded(abc());
    c.pause();

    for (input, expected) in [(-0.5, 0.0), (1.7, 1.0), (0.25, 0.25), (f32::NAN, 0.0)] {
        c.set_volume(input);
        assert_eq!(c.volume(), expected);
        assert_eq!(c.backend().last_call(), Some(&Call::SetVolume(expected)));
    }
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn seek_clamps_to_track_duration() {
    let mut c = loaded(abc());
    c.seek(Duration::from_secs(60));
    assert_eq!(c.position(), Duration::from_secs(5));
    assert_eq!(
        c.backend().last_call(),
        Some(&Call::Seek(1, Duration::from_secs(5)))
    );

    c.seek(Duration::from_secs(2));
    assert_eq!(c.position(), Duration::from_secs(2));
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn seek_by_clamps_at_both_ends() {
    let mut c = loaded(abc());
    c.backend_mut().elapsed = Duration::from_secs(2);
    c.seek_by(-100);
    assert_eq!(c.position(), Duration::ZERO);

    c.seek_by(100);
    assert_eq!(c.position(), Duration::from_secs(5));
}

#[test]
fn seek_fraction_maps_onto_duration() {
    let mut c = loaded(vec![track("long", 180)]);
    c.seek_fraction(0.5);
    assert_eq!(c.position(), Duration::from_secs(90));
    c.seek_fraction(1.0);
    assert_eq!(c.position(), Duration::from_secs(180));
    c.seek_fraction(-3.0);
    assert_eq!(c.position(), Duration::ZERO);
}

#[test]
fn seek_does_not_change_paused_state() {
    let mut c = loaded(abc());
    c.pause();
    c.seek(Duration::from_secs(1));
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn seek_while_stopped_becomes_start_offset() {
    let mut c = loaded(abc());
    c.stop();
    c.seek(Duration::from_secs(3));
    assert_eq!(c.elapsed(), Duration::from_secs(3));

    c.play();
    let calls = &c.backend().calls;
    let n = calls.len();
    assert_eq!(calls[n - 3], Call::Load(PathBuf::from("/music/A.mp3")));
    assert_eq!(calls[n - 2], Call::Seek(2, Duration::from_secs(3)));
    assert_eq!(calls[n - 1], Call::Play(2));
}

#[test]
fn failed_seek_reports_without_changing_state() {
    let mut c = loaded(abc());
    c.backend_mut().fail_seek = true;

    c.seek(Duration::from_secs(2));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_index(), Some(0));
    assert!(c.last_error().is_some());

    c.pause();
    c.seek_by(1);
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.current_index(), Some(0));
    assert!(c.last_error().is_some());

    // The next successful start clears the message.
    c.next();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert!(c.last_error().is_none());
}

#[test]
fn failed_start_offset_still_plays() {
    let mut c = loaded(abc());
    c.stop();
    c.seek(Duration::from_secs(3));
    c.backend_mut().fail_seek = true;

    c.play();

    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_index(), Some(0));
    let calls = &c.backend().calls;
    let n = calls.len();
    assert_eq!(calls[n - 2], Call::Seek(2, Duration::from_secs(3)));
    assert_eq!(calls[n - 1], Call::Play(2));
}

#[test]
fn track_starts_counts_every_successful_start() {
    let mut c = coordinator();
    assert_eq!(c.track_starts(), 0);

    c.load_playlist(vec![track("solo", 5)]);
    assert_eq!(c.track_starts(), 1);

    // One-track next lands on the same index but is a new start.
    c.next();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.track_starts(), 2);

    c.pause();
    c.play();
    assert_eq!(c.track_starts(), 2);

    c.cycle_loop_mode();
    c.cycle_loop_mode();
    tick_at(&mut c, 5);
    assert_eq!(c.track_starts(), 3);

    c.backend_mut().unplayable.insert(PathBuf::from("/music/solo.mp3"));
    c.next();
    assert_eq!(c.track_starts(), 3);
}

#[test]
fn cycle_loop_mode_has_period_three() {
    let mut c = coordinator();
    assert_eq!(c.cycle_loop_mode(), LoopMode::All);
    assert_eq!(c.cycle_loop_mode(), LoopMode::One);
    assert_eq!(c.cycle_loop_mode(), LoopMode::Off);

    for _ in 0..10 {
        c.cycle_loop_mode();
    }
    // 10 % 3 == 1
    assert_eq!(c.loop_mode(), LoopMode::All);
}

#[test]
fn cycle_loop_mode_has_no_backend_effect() {
    let mut c = loaded(abc());
    let n = c.backend().calls.len();
    c.cycle_loop_mode();
    assert_eq!(c.backend().calls.len(), n);
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn loop_off_plays_through_and_stops_after_last() {
    let mut c = loaded(abc());

    tick_at(&mut c, 4);
    assert_eq!(c.current_index(), Some(0));

    tick_at(&mut c, 5);
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);

    tick_at(&mut c, 3);
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.state(), PlaybackState::Playing);

    tick_at(&mut c, 4);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.elapsed(), Duration::ZERO);
}

#[test]
fn loop_one_restarts_same_track() {
    let mut c = loaded(abc());
    c.next();
    c.cycle_loop_mode();
    c.cycle_loop_mode();
    assert_eq!(c.loop_mode(), LoopMode::One);
    let loads = c.backend().loads().len();

    tick_at(&mut c, 3);

    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.elapsed(), Duration::ZERO);
    assert_eq!(c.backend().loads().len(), loads + 1);
    assert_eq!(
        c.backend().loads().last(),
        Some(&PathBuf::from("/music/B.mp3"))
    );
}

#[test]
fn loop_all_wraps_from_last_to_first() {
    let mut c = loaded(abc());
    c.previous();
    c.cycle_loop_mode();
    assert_eq!(c.current_index(), Some(2));

    tick_at(&mut c, 4);

    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn tick_fires_once_per_track_end() {
    let mut c = loaded(vec![track("A", 5), track("B", 5), track("C", 5)]);
    c.backend_mut().finished = true;
    c.on_tick();
    assert_eq!(c.current_index(), Some(1));
    let loads = c.backend().loads().len();

    c.backend_mut().elapsed = Duration::from_secs(1);
    c.on_tick();
    c.on_tick();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.backend().loads().len(), loads);
}

#[test]
fn tick_ignores_end_while_paused() {
    let mut c = loaded(abc());
    c.pause();
    tick_at(&mut c, 10);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn unknown_duration_relies_on_backend_finished() {
    let mut c = loaded(vec![track("nolen", 0), track("next", 0)]);
    tick_at(&mut c, 500);
    assert_eq!(c.current_index(), Some(0));

    c.backend_mut().finished = true;
    c.on_tick();
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn unplayable_track_stops_and_reports() {
    let mut backend = FakeBackend::default();
    backend.unplayable.insert(PathBuf::from("/music/B.mp3"));
    let mut c = Coordinator::new(backend, 1.0, LoopMode::Off);
    c.load_playlist(abc());

    c.next();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_index(), Some(1));
    assert!(c.last_error().is_some());

    // Nothing to poll while stopped.
    c.on_tick();
    assert_eq!(c.current_index(), Some(1));

    c.next();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_index(), Some(2));
    assert!(c.last_error().is_none());
}

#[test]
fn unplayable_first_track_leaves_playlist_loaded_but_stopped() {
    let mut backend = FakeBackend::default();
    backend.unplayable.insert(PathBuf::from("/music/A.mp3"));
    let mut c = Coordinator::new(backend, 1.0, LoopMode::Off);

    c.load_playlist(abc());

    assert_eq!(c.tracks().len(), 3);
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.state(), PlaybackState::Stopped);

    c.play();
    assert_eq!(c.state(), PlaybackState::Stopped);
}

#[test]
fn progress_tracks_elapsed_fraction() {
    let mut c = loaded(vec![track("ten", 10)]);
    c.backend_mut().elapsed = Duration::from_secs(5);
    assert_eq!(c.progress(), 0.5);

    c.backend_mut().elapsed = Duration::from_secs(15);
    assert_eq!(c.elapsed(), Duration::from_secs(10));
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn handle_dispatches_commands() {
    let mut c = coordinator();
    c.handle(Command::LoadPlaylist(abc()));
    c.handle(Command::Next);
    assert_eq!(c.current_index(), Some(1));
    c.handle(Command::Previous);
    c.handle(Command::Previous);
    assert_eq!(c.current_index(), Some(2));
    c.handle(Command::PlayAt(1));
    assert_eq!(c.current_index(), Some(1));

    c.handle(Command::Pause);
    assert_eq!(c.state(), PlaybackState::Paused);
    c.handle(Command::Play);
    assert_eq!(c.state(), PlaybackState::Playing);
    c.handle(Command::TogglePlayPause);
    assert_eq!(c.state(), PlaybackState::Paused);

    c.handle(Command::Seek(Duration::from_secs(2)));
    assert_eq!(c.position(), Duration::from_secs(2));
    c.handle(Command::SeekFraction(1.0));
    assert_eq!(c.position(), Duration::from_secs(3));
    c.handle(Command::SeekBy(-1));
    assert_eq!(c.position(), Duration::from_secs(2));

    c.handle(Command::SetVolume(2.0));
    assert_eq!(c.volume(), 1.0);
    c.handle(Command::CycleLoopMode);
    assert_eq!(c.loop_mode(), LoopMode::All);

    c.handle(Command::Stop);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn loop_mode_cycle_never_leaves_its_three_values() {
    let mut m = LoopMode::default();
    for _ in 0..30 {
        m = m.cycle();
        assert!(matches!(m, LoopMode::Off | LoopMode::All | LoopMode::One));
    }
    assert_eq!(m, LoopMode::Off);
}
