use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Imperative audio output the coordinator drives.
///
/// Every call is fire-and-forget and must return promptly; progress is
/// observed by polling [`elapsed`](Self::elapsed) and
/// [`is_finished`](Self::is_finished).
pub trait AudioBackend {
    /// One loaded track.
    type Handle;

    /// Open and decode `path`. The returned handle starts paused.
    fn load(&mut self, path: &Path) -> Result<Self::Handle>;
    fn play(&mut self, handle: &Self::Handle);
    fn pause(&mut self, handle: &Self::Handle);
    fn resume(&mut self, handle: &Self::Handle);
    fn stop(&mut self, handle: &Self::Handle);
    fn seek(&mut self, handle: &Self::Handle, position: Duration) -> Result<()>;
    /// Output level in `0.0..=1.0`, applied to current and future handles.
    fn set_volume(&mut self, level: f32);
    fn elapsed(&self, handle: &Self::Handle) -> Duration;
    fn is_finished(&self, handle: &Self::Handle) -> bool;
}
