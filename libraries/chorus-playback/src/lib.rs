//! Chorus - Playback Backends
//!
//! Uniform control surface over the two ways a journal track can be played:
//!
//! - **Native audio**: a directly playable URL bound to an audio output.
//!   Starting may be refused by the host's autoplay policy; the refusal is
//!   logged and swallowed.
//! - **Embedded frame**: a third-party video page played inside a frame
//!   that only accepts fire-and-forget command messages.
//!
//! The backend is chosen per entry from its URL (see [`PlaybackTarget`]).
//! Switching backends always silences the previous one first.
//!
//! # Example
//!
//! ```rust
//! use chorus_core::PlaylistEntry;
//! use chorus_playback::{PlaybackAdapter, PlaybackControl, PlaybackIntent};
//! # use chorus_playback::{AudioOutput, FrameChannel, Result};
//! # struct Silent;
//! # impl AudioOutput for Silent {
//! #     fn load(&mut self, _url: &str) {}
//! #     fn play(&mut self) -> Result<()> { Ok(()) }
//! #     fn pause(&mut self) {}
//! #     fn position(&self) -> f64 { 0.0 }
//! #     fn seek(&mut self, _seconds: f64) {}
//! # }
//! # impl FrameChannel for Silent {
//! #     fn mount(&mut self, _video_id: &str) {}
//! #     fn unmount(&mut self) {}
//! #     fn post_message(&mut self, _payload: &str) {}
//! # }
//!
//! let mut adapter = PlaybackAdapter::new(Box::new(Silent), Box::new(Silent));
//! let track = PlaylistEntry::new("https://youtu.be/ABC123", "Rain sounds");
//!
//! // Mounts the frame for "ABC123" and posts a playVideo command
//! adapter.command(Some(&track), PlaybackIntent::Play);
//! assert_eq!(adapter.native_position(), None);
//! ```

mod adapter;
mod error;
mod frame;
pub mod media;
mod output;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Public exports
pub use adapter::{PlaybackAdapter, PlaybackControl, PlaybackIntent};
pub use error::{BackendError, Result};
pub use frame::{FrameChannel, FrameCommand};
pub use media::{extract_video_id, is_embedded_url, PlaybackTarget, TargetKind};
pub use output::AudioOutput;
