//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(#[from] chorus_cache::CacheError),

    #[error("Remote error: {0}")]
    Remote(#[from] chorus_remote::RemoteError),

    #[error("Invalid journal: {0}")]
    Core(#[from] chorus_core::CoreError),

    #[error(transparent)]
    Sync(#[from] chorus_sync::SyncError),
}

pub type Result<T> = std::result::Result<T, CliError>;
