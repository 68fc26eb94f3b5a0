//! Audio subsystem: the backend seam, its `rodio` implementation, the
//! playlist and the playback coordinator.

mod backend;
mod coordinator;
mod playlist;
mod sink;
mod types;

pub use backend::AudioBackend;
pub use coordinator::Coordinator;
pub use sink::RodioBackend;
pub use types::{Command, LoopMode, PlaybackState};

#[cfg(test)]
mod tests;
