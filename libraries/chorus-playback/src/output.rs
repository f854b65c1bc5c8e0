//! Native audio output trait
//!
//! Abstracts the host's audio element (browser `<audio>`, desktop player,
//! test double) behind a small control surface.

use crate::error::Result;

/// Platform audio output handle
///
/// Implementors bind a URL and start/stop playback. Starting is asynchronous
/// on most hosts: `play` only *requests* a start and may report that the
/// host refused it. Callers treat a rejection as non-fatal.
pub trait AudioOutput: Send {
    /// Bind a new source URL, replacing any previous one
    fn load(&mut self, url: &str);

    /// Request playback start
    ///
    /// # Returns
    /// * `Ok(())` - Start requested
    /// * `Err(BackendError::PlaybackRejected)` - Host refused (autoplay policy)
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Move the playback position
    fn seek(&mut self, seconds: f64);
}
