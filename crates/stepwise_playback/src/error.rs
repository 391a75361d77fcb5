//! Playback error types

use thiserror::Error;

/// Rejected transport arguments. State is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("step delay must be a positive number of milliseconds, got {ms}")]
    InvalidSpeed { ms: u64 },

    #[error("step {index} is out of range for a trace of {len} steps")]
    OutOfRangeIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
