//! Error types for the audio backend.

use std::io;

use thiserror::Error;
use tonewav_spec::{BackendError, ParamError};

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while synthesizing, encoding, or forwarding audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Parameters were rejected before any I/O.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    /// The output file could not be created, written, or persisted.
    #[error("failed to write WAV output: {0}")]
    Encode(#[source] io::Error),

    /// The written file could not be reopened or forwarded to the sink.
    #[error("failed to forward audio to playback sink: {0}")]
    Playback(#[source] io::Error),

    /// The sample buffer does not match the length the header declares.
    #[error("sample count mismatch: header declares {expected} samples, buffer holds {actual}")]
    SampleCountMismatch {
        /// Samples implied by the parameters.
        expected: u64,
        /// Samples actually supplied.
        actual: u64,
    },

    /// A byte buffer is not a canonical 16-bit mono PCM WAV file.
    #[error("malformed WAV data: {message}")]
    MalformedWav {
        /// What was wrong.
        message: String,
    },

    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AudioError {
    /// Creates a malformed WAV error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedWav {
            message: message.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidParameter(_) => "AUDIO_001",
            AudioError::Encode(_) => "AUDIO_002",
            AudioError::Playback(_) => "AUDIO_003",
            AudioError::SampleCountMismatch { .. } => "AUDIO_004",
            AudioError::MalformedWav { .. } => "AUDIO_005",
            AudioError::Io(_) => "AUDIO_006",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
