/// Cache-specific errors
use thiserror::Error;

/// Result type alias using `CacheError`
pub type Result<T> = std::result::Result<T, CacheError>;

/// Cache error types
#[derive(Error, Debug)]
pub enum CacheError {
    /// Storage is disabled or over quota
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Key cannot be mapped onto the backing store
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
