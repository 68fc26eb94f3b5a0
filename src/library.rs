//! Track model, metadata reading and path scanning.

mod metadata;
mod model;
mod scan;

pub use metadata::{LoftyReader, MetadataReader};
pub use model::{Track, TrackMetadata, UNKNOWN};
pub use scan::scan;
