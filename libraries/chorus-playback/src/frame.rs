//! Embedded video frame control
//!
//! The frame's player cannot be inspected. The only control path is posting
//! JSON command messages into it, with no acknowledgment and no error
//! channel.

use crate::adapter::PlaybackIntent;

/// Message channel into an embedded video frame
///
/// Implementations that need the frame to finish loading before it accepts
/// messages are expected to queue posts made in the meantime.
pub trait FrameChannel: Send {
    /// Mount (or re-point) the frame at a media id
    fn mount(&mut self, video_id: &str);

    /// Remove the frame
    fn unmount(&mut self);

    /// Post a serialized message, fire-and-forget
    fn post_message(&mut self, payload: &str);
}

/// Player command posted to the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    PlayVideo,
    PauseVideo,
}

impl FrameCommand {
    pub fn for_intent(intent: PlaybackIntent) -> Self {
        match intent {
            PlaybackIntent::Play => Self::PlayVideo,
            PlaybackIntent::Pause => Self::PauseVideo,
        }
    }

    /// Player function name
    pub fn func(&self) -> &'static str {
        match self {
            Self::PlayVideo => "playVideo",
            Self::PauseVideo => "pauseVideo",
        }
    }

    /// Wire payload: `{"event":"command","func":"...","args":[]}`
    pub fn to_message(&self) -> String {
        serde_json::json!({
            "event": "command",
            "func": self.func(),
            "args": [],
        })
        .to_string()
    }
}
