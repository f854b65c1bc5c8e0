//! Read-only view of a session for display

use chorus_core::{JournalId, PlaybackState, PlaylistEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point-in-time copy of a journal's playback state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub journal: JournalId,
    pub playlist: Vec<PlaylistEntry>,
    pub current_track_index: usize,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub last_updated: DateTime<Utc>,
}

impl SessionSnapshot {
    pub(crate) fn capture(journal: &JournalId, state: &PlaybackState) -> Self {
        Self {
            journal: journal.clone(),
            playlist: state.playlist().to_vec(),
            current_track_index: state.current_track_index(),
            is_playing: state.is_playing(),
            position_seconds: state.position_seconds(),
            last_updated: state.last_updated(),
        }
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.playlist.get(self.current_track_index)
    }

    /// Title of the active track, or "No track" for an empty playlist
    pub fn current_title(&self) -> &str {
        self.current_entry()
            .map(|entry| entry.title.as_str())
            .unwrap_or("No track")
    }

    /// 1-based position label, e.g. "Track 2 of 5"
    pub fn track_label(&self) -> String {
        if self.playlist.is_empty() {
            return "Track 0 of 0".to_string();
        }
        format!(
            "Track {} of {}",
            self.current_track_index + 1,
            self.playlist.len()
        )
    }

    pub fn has_next(&self) -> bool {
        self.current_track_index + 1 < self.playlist.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_track_index > 0
    }
}
