//! Headless playback backends
//!
//! The CLI has no audio device or video surface; these backends log every
//! command and keep a wall-clock estimate of the native position so drift
//! correction has something to work with.

use chorus_playback::{AudioOutput, BackendError, FrameChannel, PlaybackAdapter};
use std::time::Instant;
use tracing::info;

/// Audio output that only logs
#[derive(Debug, Default)]
pub struct LogAudioOutput {
    source: Option<String>,
    offset: f64,
    started: Option<Instant>,
}

impl LogAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    fn settle(&mut self) {
        if let Some(started) = self.started.take() {
            self.offset += started.elapsed().as_secs_f64();
        }
    }
}

impl AudioOutput for LogAudioOutput {
    fn load(&mut self, url: &str) {
        info!(url = %url, "audio: load");
        self.source = Some(url.to_string());
        self.offset = 0.0;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    fn play(&mut self) -> Result<(), BackendError> {
        let Some(source) = self.source.as_deref() else {
            return Err(BackendError::PlaybackRejected("no source loaded".into()));
        };
        info!(url = %source, "audio: play");
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        info!("audio: pause");
        self.settle();
    }

    fn position(&self) -> f64 {
        self.offset
            + self
                .started
                .map(|started| started.elapsed().as_secs_f64())
                .unwrap_or(0.0)
    }

    fn seek(&mut self, seconds: f64) {
        info!(seconds, "audio: seek");
        self.offset = seconds.max(0.0);
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }
}

/// Embedded frame that only logs
#[derive(Debug, Default)]
pub struct LogFrameChannel {
    mounted: Option<String>,
}

impl LogFrameChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> Option<&str> {
        self.mounted.as_deref()
    }
}

impl FrameChannel for LogFrameChannel {
    fn mount(&mut self, video_id: &str) {
        info!(video_id = %video_id, "frame: mount");
        self.mounted = Some(video_id.to_string());
    }

    fn unmount(&mut self) {
        info!("frame: unmount");
        self.mounted = None;
    }

    fn post_message(&mut self, message: &str) {
        info!(video_id = ?self.mounted, message = %message, "frame: post");
    }
}

/// Adapter over the logging backends
pub fn log_adapter() -> PlaybackAdapter {
    PlaybackAdapter::new(Box::new(LogAudioOutput::new()), Box::new(LogFrameChannel::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_without_source_is_rejected() {
        let mut audio = LogAudioOutput::new();
        assert!(audio.play().is_err());
        assert!(!audio.is_playing());
    }

    #[test]
    fn position_follows_seek_and_load() {
        let mut audio = LogAudioOutput::new();
        audio.load("https://example.com/a.mp3");
        audio.seek(30.0);
        assert!(audio.position() >= 30.0);

        audio.play().unwrap();
        audio.pause();
        assert!(audio.position() >= 30.0);

        audio.load("https://example.com/b.mp3");
        assert_eq!(audio.position(), 0.0);
    }

    #[test]
    fn frame_tracks_mount() {
        let mut frame = LogFrameChannel::new();
        frame.mount("ABC123");
        assert_eq!(frame.mounted(), Some("ABC123"));
        frame.unmount();
        assert!(frame.mounted().is_none());
    }
}
