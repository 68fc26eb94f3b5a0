//! `rodio` implementation of [`AudioBackend`].
//!
//! One `Sink` per loaded track, all attached to a single output stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::{AudioError, Result};

use super::backend::AudioBackend;

pub struct RodioBackend {
    stream: OutputStream,
    volume: f32,
    /// The most recently loaded sink, kept so volume changes reach it.
    current: Option<Rc<Sink>>,
}

impl RodioBackend {
    pub fn open_default() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI on exit.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            volume: 1.0,
            current: None,
        })
    }
}

impl AudioBackend for RodioBackend {
    type Handle = Rc<Sink>;

    fn load(&mut self, path: &Path) -> Result<Self::Handle> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(source);

        let sink = Rc::new(sink);
        self.current = Some(Rc::clone(&sink));
        tracing::debug!(path = %path.display(), "loaded sink");
        Ok(sink)
    }

    fn play(&mut self, handle: &Self::Handle) {
        handle.play();
    }

    fn pause(&mut self, handle: &Self::Handle) {
        handle.pause();
    }

    fn resume(&mut self, handle: &Self::Handle) {
        handle.play();
    }

    fn stop(&mut self, handle: &Self::Handle) {
        handle.stop();
        if self
            .current
            .as_ref()
            .is_some_and(|cur| Rc::ptr_eq(cur, handle))
        {
            self.current = None;
        }
    }

    fn seek(&mut self, handle: &Self::Handle, position: Duration) -> Result<()> {
        handle
            .try_seek(position)
            .map_err(|e| AudioError::Seek(e.to_string()))
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(sink) = &self.current {
            sink.set_volume(level);
        }
    }

    fn elapsed(&self, handle: &Self::Handle) -> Duration {
        handle.get_pos()
    }

    fn is_finished(&self, handle: &Self::Handle) -> bool {
        handle.empty()
    }
}
