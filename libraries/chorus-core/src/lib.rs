//! Chorus Core
//!
//! Platform-agnostic domain types and error handling shared by every Chorus
//! crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `JournalId`, the scope of one shared playback state
//! - **Playlist types**: `PlaylistEntry`
//! - **Playback state**: the in-memory `PlaybackState`, the remote
//!   `RemoteDocument` projection and the partial `PlaybackUpdate`
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use chorus_core::{JournalId, PlaybackState, PlaylistEntry};
//!
//! let journal = JournalId::parse("demo-journal-vol1").unwrap();
//! let mut state = PlaybackState::with_playlist(vec![
//!     PlaylistEntry::new("https://example.com/a.mp3", "A"),
//!     PlaylistEntry::new("https://example.com/b.mp3", "B"),
//! ]);
//!
//! state.set_current_track_index(7);
//! assert_eq!(state.current_track_index(), 1);
//! assert_eq!(journal.as_str(), "demo-journal-vol1");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{
    JournalId, PlaybackState, PlaybackUpdate, PlaylistEntry, RemoteDocument, DEFAULT_TRACK_TITLE,
    DEFAULT_TRACK_URL,
};
