//! Playback backend adapter
//!
//! Routes play/pause intents for the current playlist entry to exactly one
//! backend, and makes sure the other one is silent.

use crate::frame::{FrameChannel, FrameCommand};
use crate::media::{PlaybackTarget, TargetKind};
use crate::output::AudioOutput;
use chorus_core::PlaylistEntry;
use tracing::{debug, trace};

/// Desired play state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIntent {
    Play,
    Pause,
}

impl PlaybackIntent {
    pub fn from_playing(playing: bool) -> Self {
        if playing {
            Self::Play
        } else {
            Self::Pause
        }
    }
}

/// Abstract playback capability used by the reconciliation engine
///
/// The engine never sees audio elements or frames, only this surface.
pub trait PlaybackControl: Send {
    /// Apply an intent to the backend that owns `entry`
    ///
    /// `None` means there is nothing to play; the active backend is paused.
    fn command(&mut self, entry: Option<&PlaylistEntry>, intent: PlaybackIntent);

    /// Native playback position, `None` when the native path is not active
    fn native_position(&self) -> Option<f64>;

    /// Move the native playback position (no-op when not active)
    fn seek_native(&mut self, seconds: f64);
}

/// Dual-backend adapter over a native audio output and an embedded frame
pub struct PlaybackAdapter {
    audio: Box<dyn AudioOutput>,
    frame: Box<dyn FrameChannel>,

    // Backend that received the last command
    active: Option<PlaybackTarget>,
    loaded_url: Option<String>,
    mounted_video: Option<String>,
}

impl PlaybackAdapter {
    pub fn new(audio: Box<dyn AudioOutput>, frame: Box<dyn FrameChannel>) -> Self {
        Self {
            audio,
            frame,
            active: None,
            loaded_url: None,
            mounted_video: None,
        }
    }

    /// Target that received the last command
    pub fn active_target(&self) -> Option<&PlaybackTarget> {
        self.active.as_ref()
    }

    /// Silence whatever backend is currently active
    fn silence_active(&mut self) {
        match self.active.as_ref().map(PlaybackTarget::kind) {
            Some(TargetKind::NativeAudio) => {
                trace!("Pausing native audio");
                self.audio.pause();
            }
            Some(TargetKind::EmbeddedFrame) => {
                if self.mounted_video.take().is_some() {
                    trace!("Pausing and unmounting embedded frame");
                    self.frame
                        .post_message(&FrameCommand::PauseVideo.to_message());
                    self.frame.unmount();
                }
            }
            None => {}
        }
    }

    fn command_native(&mut self, url: &str, intent: PlaybackIntent) {
        if self.loaded_url.as_deref() != Some(url) {
            debug!(url = %url, "Binding native audio source");
            self.audio.load(url);
            self.loaded_url = Some(url.to_string());
        }

        match intent {
            PlaybackIntent::Play => {
                if let Err(e) = self.audio.play() {
                    // State stays optimistic; the user can retry with a gesture
                    debug!(error = %e, "Native playback start rejected");
                }
            }
            PlaybackIntent::Pause => self.audio.pause(),
        }
    }

    fn command_frame(&mut self, video_id: &str, intent: PlaybackIntent) {
        if video_id.is_empty() {
            debug!("No media id for embedded entry, skipping frame command");
            return;
        }

        if self.mounted_video.as_deref() != Some(video_id) {
            debug!(video_id = %video_id, "Mounting embedded frame");
            self.frame.mount(video_id);
            self.mounted_video = Some(video_id.to_string());
        }

        let command = FrameCommand::for_intent(intent);
        trace!(func = command.func(), "Posting frame command");
        self.frame.post_message(&command.to_message());
    }
}

impl PlaybackControl for PlaybackAdapter {
    fn command(&mut self, entry: Option<&PlaylistEntry>, intent: PlaybackIntent) {
        let Some(entry) = entry else {
            self.silence_active();
            self.active = None;
            return;
        };

        let target = PlaybackTarget::for_url(&entry.url);

        if self
            .active
            .as_ref()
            .is_some_and(|active| active.kind() != target.kind())
        {
            self.silence_active();
        }

        match &target {
            PlaybackTarget::NativeAudio { url } => self.command_native(url, intent),
            PlaybackTarget::EmbeddedFrame { video_id } => self.command_frame(video_id, intent),
        }

        self.active = Some(target);
    }

    fn native_position(&self) -> Option<f64> {
        match self.active {
            Some(PlaybackTarget::NativeAudio { .. }) => Some(self.audio.position()),
            _ => None,
        }
    }

    fn seek_native(&mut self, seconds: f64) {
        if matches!(self.active, Some(PlaybackTarget::NativeAudio { .. })) {
            debug!(seconds, "Seeking native audio");
            self.audio.seek(seconds);
        }
    }
}
