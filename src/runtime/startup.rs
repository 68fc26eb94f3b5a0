use std::path::{Path, PathBuf};

use crate::app::App;
use crate::audio::{AudioBackend, Command, Coordinator};
use crate::config::LibrarySettings;
use crate::library::{MetadataReader, scan};

/// Scan `paths` and, when anything playable turns up, replace the playlist
/// and start playing. An empty scan leaves the current playlist alone.
pub fn load_tracks<B: AudioBackend>(
    player: &mut Coordinator<B>,
    app: &mut App,
    paths: &[PathBuf],
    library: &LibrarySettings,
    reader: &impl MetadataReader,
) {
    let tracks = scan(paths, library, reader);
    if tracks.is_empty() {
        tracing::info!(?paths, "nothing playable in selection");
        app.set_status("no playable files found");
        return;
    }

    let count = tracks.len();
    player.handle(Command::LoadPlaylist(tracks));
    app.selected = 0;
    app.set_status(format!("loaded {count} track(s)"));
}

/// Expand a leading `~` the way a shell would, since the prompt is not one.
pub fn expand_home(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}
