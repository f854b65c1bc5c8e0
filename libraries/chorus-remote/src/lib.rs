//! Chorus Remote
//!
//! Live connection between a journal session and the shared remote document
//! store.
//!
//! # Features
//!
//! - **Subscriptions**: ordered snapshots of one journal document, starting
//!   with the state at subscribe time, released exactly once
//! - **Merge publishes**: partial updates that only touch supplied fields
//! - **Backends**: [`HttpDocumentStore`] (REST, polling listener),
//!   [`MemoryDocumentStore`] (in-process, shared between sessions) and
//!   [`DisabledRemote`] (no store configured)
//!
//! Callers treat every publish as fire-and-forget; errors are reported so
//! they can be logged, never retried here.
//!
//! # Example
//!
//! ```ignore
//! use chorus_core::{JournalId, PlaybackUpdate};
//! use chorus_remote::{HttpDocumentStore, RemoteChannel, RemoteConfig};
//!
//! let store = HttpDocumentStore::new(RemoteConfig::new("https://sync.example.com"))?;
//! let journal = JournalId::parse("demo-journal-vol1")?;
//!
//! let mut subscription = store.subscribe(&journal).await?;
//! while let Some(snapshot) = subscription.next().await {
//!     println!("remote state: {:?}", snapshot);
//! }
//! ```

mod channel;
mod error;
mod http;
mod memory;
mod subscription;

// Re-export main types
pub use channel::{DisabledRemote, RemoteChannel};
pub use error::{RemoteError, Result};
pub use http::{HttpDocumentStore, RemoteConfig};
pub use memory::MemoryDocumentStore;
pub use subscription::{RemoteSnapshot, Subscription};
