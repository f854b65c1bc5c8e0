//! Chorus Cache
//!
//! Device-local mirror of each journal's playlist and active track index.
//! It is a warm start across reloads and the only data source when no
//! remote store is reachable.
//!
//! Values live under two keys per journal:
//! - `music_playlist_<journal>`: JSON array of playlist entries
//! - `music_current_<journal>`: decimal track index
//!
//! # Example
//!
//! ```rust
//! use chorus_cache::{CacheMirror, MemoryStore};
//! use chorus_core::{JournalId, PlaylistEntry};
//! use std::sync::Arc;
//!
//! let mirror = CacheMirror::new(Arc::new(MemoryStore::new()));
//! let journal = JournalId::parse("demo").unwrap();
//!
//! mirror.save(&journal, &[PlaylistEntry::new("https://example.com/a.mp3", "A")], 0);
//! assert_eq!(mirror.load(&journal).current_track_index, Some(0));
//! ```

mod error;
mod mirror;
mod store;

// Public exports
pub use error::{CacheError, Result};
pub use mirror::{index_key, playlist_key, CacheMirror, CachedPlayback};
pub use store::{FileStore, KeyValueStore, MemoryStore};
