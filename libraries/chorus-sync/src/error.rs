//! Error types for sync sessions

use chorus_core::{CoreError, JournalId};
use thiserror::Error;

/// Sync errors
#[derive(Error, Debug)]
pub enum SyncError {
    /// A local intent carried unusable input (e.g., a blank URL)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The session actor is gone
    #[error("Session closed for journal {0}")]
    SessionClosed(JournalId),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
