//! Error types for the precomputation

use std::io;
use thiserror::Error;

/// Precomputation error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading the score or writing an artifact
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed score or trace JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WAV encoding failure
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Score has no track at the configured index
    #[error("Score has no track {index} ({available} available)")]
    MissingTrack { index: usize, available: usize },
}

/// Result type for precomputation operations
pub type Result<T> = std::result::Result<T, Error>;
