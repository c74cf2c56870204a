//! Error types shared across the crate.

use thiserror::Error;

/// Failures while reading or writing a RIFF/WAVE container.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("unable to open file: {0}")]
    Open(#[source] std::io::Error),

    #[error("file is not RIFF")]
    NotRiff,

    #[error("file is not RIFF WAVE")]
    NotWave,

    #[error("file is not PCM (format tag {0})")]
    NotPcm(u16),

    #[error("missing {0} chunk")]
    MissingChunk(&'static str),

    #[error("truncated {0} chunk")]
    Truncated(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
