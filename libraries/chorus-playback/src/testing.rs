//! Recording backends for tests and headless hosts
//!
//! Every call made through the returned handles is appended to one shared
//! log, so ordering across the audio output and the frame is observable.

use crate::error::{BackendError, Result};
use crate::frame::FrameChannel;
use crate::output::AudioOutput;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Mount(String),
    Unmount,
    Post(String),
}

#[derive(Debug, Default)]
struct Shared {
    calls: Vec<BackendCall>,
    position: f64,
    reject_play: bool,
}

/// Handle onto a shared call log
#[derive(Debug, Clone, Default)]
pub struct BackendRecorder {
    shared: Arc<Mutex<Shared>>,
}

impl BackendRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Audio output that records into this log
    pub fn audio_output(&self) -> Box<dyn AudioOutput> {
        Box::new(RecordingAudioOutput {
            shared: Arc::clone(&self.shared),
        })
    }

    /// Frame channel that records into this log
    pub fn frame_channel(&self) -> Box<dyn FrameChannel> {
        Box::new(RecordingFrame {
            shared: Arc::clone(&self.shared),
        })
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of `Play`/`Pause` calls and frame posts
    pub fn playback_commands(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    BackendCall::Play | BackendCall::Pause | BackendCall::Post(_)
                )
            })
            .count()
    }

    pub fn clear(&self) {
        self.lock().calls.clear();
    }

    /// Simulate playback progress
    pub fn set_position(&self, seconds: f64) {
        self.lock().position = seconds;
    }

    /// Make every `play` request fail as if blocked by autoplay policy
    pub fn set_reject_play(&self, reject: bool) {
        self.lock().reject_play = reject;
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct RecordingAudioOutput {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingAudioOutput {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioOutput for RecordingAudioOutput {
    fn load(&mut self, url: &str) {
        let mut shared = self.lock();
        shared.position = 0.0;
        shared.calls.push(BackendCall::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<()> {
        let mut shared = self.lock();
        shared.calls.push(BackendCall::Play);
        if shared.reject_play {
            return Err(BackendError::PlaybackRejected(
                "autoplay blocked".to_string(),
            ));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.lock().calls.push(BackendCall::Pause);
    }

    fn position(&self) -> f64 {
        self.lock().position
    }

    fn seek(&mut self, seconds: f64) {
        let mut shared = self.lock();
        shared.position = seconds;
        shared.calls.push(BackendCall::Seek(seconds));
    }
}

struct RecordingFrame {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingFrame {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameChannel for RecordingFrame {
    fn mount(&mut self, video_id: &str) {
        self.lock().calls.push(BackendCall::Mount(video_id.to_string()));
    }

    fn unmount(&mut self) {
        self.lock().calls.push(BackendCall::Unmount);
    }

    fn post_message(&mut self, payload: &str) {
        self.lock().calls.push(BackendCall::Post(payload.to_string()));
    }
}
