//! Error types for playback backends

use thiserror::Error;

/// Backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// The host refused to start playback (autoplay policy, no user gesture)
    #[error("Playback start rejected: {0}")]
    PlaybackRejected(String),

    /// Audio output error
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
