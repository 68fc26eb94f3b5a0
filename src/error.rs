//! Error types for the audio backend boundary.
//!
//! These never reach the UI as errors: the coordinator logs them and turns
//! them into state (`Stopped`) plus a status message.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("no audio output device: {0}")]
    Output(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("seek failed: {0}")]
    Seek(String),
}

pub type Result<T> = std::result::Result<T, AudioError>;
