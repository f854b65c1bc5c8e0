//! Chorus Sync
//!
//! Keeps one journal's playback state consistent between the local player,
//! the device cache and every other client watching the same journal.
//!
//! # Architecture
//!
//! - [`ReconciliationEngine`]: synchronous owner of `PlaybackState`. Applies
//!   local intents optimistically, merges remote snapshots, suppresses
//!   play/pause echoes and corrects native drift.
//! - [`Session`]: tokio actor around one engine; local commands and remote
//!   snapshots are processed in arrival order, publishes go through an
//!   ordered fire-and-forget publisher task.
//! - [`SessionRegistry`]: at most one session per journal.
//!
//! # Example
//!
//! ```ignore
//! use chorus_sync::{SessionRegistry, SyncConfig};
//!
//! let registry = SessionRegistry::new(remote, cache, backends, SyncConfig::default());
//! let session = registry.open(&journal).await;
//!
//! session.toggle_play().await?;
//! let snapshot = session.snapshot().await?;
//! println!("{} - {}", snapshot.current_title(), snapshot.track_label());
//! ```

mod config;
mod engine;
mod error;
mod registry;
mod session;
mod snapshot;

pub use config::{DefaultTrack, SyncConfig};
pub use engine::{ReconciliationEngine, RemoteOutcome, SeedSource};
pub use error::{Result, SyncError};
pub use registry::{BackendFactory, SessionRegistry};
pub use session::{Session, SessionCommand, SessionHandle};
pub use snapshot::SessionSnapshot;
