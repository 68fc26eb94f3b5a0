use std::path::Path;

use lofty::prelude::*;

use super::model::TrackMetadata;

/// Reads display metadata for a file.
///
/// Implementations must not fail: anything unreadable maps to `None`.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Option<TrackMetadata>;
}

/// `lofty`-backed reader (ID3v1/v2, APE, Vorbis comments, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl MetadataReader for LoftyReader {
    fn read(&self, path: &Path) -> Option<TrackMetadata> {
        let tagged = match lofty::read_from_path(path) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no readable metadata");
                return None;
            }
        };

        // Properties are available even when the file carries no tags.
        let mut meta = TrackMetadata {
            duration: Some(tagged.properties().duration()),
            ..TrackMetadata::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            meta.title = tag.title().map(|v| v.to_string());
            meta.artist = tag.artist().map(|v| v.to_string());
        }

        Some(meta)
    }
}
