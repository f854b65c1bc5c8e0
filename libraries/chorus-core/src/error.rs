/// Core error types for Chorus
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Chorus
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid journal identifier
    #[error("Invalid journal id: {0}")]
    InvalidJournalId(String),
}
