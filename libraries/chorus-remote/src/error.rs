//! Error types for the remote sync channel.

use thiserror::Error;

/// Errors that can occur when talking to the remote document store.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a document
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Store is offline or unreachable
    #[error("Store unreachable: {0}")]
    ServerUnreachable(String),

    /// Channel is not accepting requests
    #[error("Remote channel unavailable: {0}")]
    Unavailable(String),
}

/// Result type for remote channel operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
