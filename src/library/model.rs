use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder shown when a tag is missing or unreadable.
pub const UNKNOWN: &str = "Unknown";

/// Raw metadata as returned by a [`super::MetadataReader`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub duration: Duration,
}

impl Track {
    /// Build a track from whatever metadata could be read.
    ///
    /// `None` (read failure) and blank tags both resolve to [`UNKNOWN`];
    /// an unknown duration becomes zero.
    pub fn from_metadata(path: &Path, meta: Option<TrackMetadata>) -> Self {
        let meta = meta.unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            title: non_blank(meta.title),
            artist: non_blank(meta.artist),
            duration: meta.duration.unwrap_or(Duration::ZERO),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string()
    }
}

fn non_blank(v: Option<String>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => UNKNOWN.to_string(),
    }
}
