use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::metadata::MetadataReader;
use super::model::Track;

/// Configured extensions, lowercased and without a leading dot.
fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// `exts` must come from [`normalized_extensions`].
fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files below `dir`, sorted case-insensitively by path.
fn walk_dir(dir: &Path, settings: &LibrarySettings, exts: &[String]) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, exts))
        .collect();

    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    files
}

/// Expand user-selected `paths` into playlist order.
///
/// Files keep the order they were given in; a directory contributes its audio
/// files (sorted) at its position. Missing paths and non-audio files are skipped.
pub(super) fn collect_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);
    let mut out = Vec::new();
    for p in paths {
        if p.is_dir() {
            out.extend(walk_dir(p, settings, &exts));
        } else if p.is_file() {
            if is_audio_file(p, &exts) {
                out.push(p.clone());
            } else {
                tracing::debug!(path = %p.display(), "skipping non-audio file");
            }
        } else {
            tracing::warn!(path = %p.display(), "path does not exist");
        }
    }
    out
}

/// Build tracks for every audio file reachable from `paths`.
pub fn scan(
    paths: &[PathBuf],
    settings: &LibrarySettings,
    reader: &impl MetadataReader,
) -> Vec<Track> {
    let tracks: Vec<Track> = collect_paths(paths, settings)
        .iter()
        .map(|p| Track::from_metadata(p, reader.read(p)))
        .collect();
    tracing::info!(count = tracks.len(), "scanned tracks");
    tracks
}
