//! Ordered tracks plus the "current track" pointer.

use crate::library::Track;

#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Playlist {
    /// Replace the contents wholesale. The pointer resets to 0 (or `None` when empty).
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.current = if tracks.is_empty() { None } else { Some(0) };
        self.tracks = tracks;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn is_last(&self) -> bool {
        self.current
            .is_some_and(|i| i + 1 == self.tracks.len())
    }

    /// Point at `index` if it is in range.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index < self.tracks.len() {
            self.current = Some(index);
        }
        self.current.filter(|&i| i == index)
    }

    /// Move forward one, wrapping from the last index to 0.
    pub fn advance(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        let i = self.current?;
        self.current = Some((i + 1) % len);
        self.current
    }

    /// Move back one, wrapping from 0 to the last index.
    pub fn retreat(&mut self) -> Option<usize> {
        let len = self.tracks.len();
        let i = self.current?;
        self.current = Some((i + len - 1) % len);
        self.current
    }
}
