/// Playback state types for multi-client journal sync
use super::entry::PlaylistEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// URL of the built-in track used when no other source has a playlist
pub const DEFAULT_TRACK_URL: &str =
    "https://cdn.pixabay.com/download/audio/2022/05/27/audio_1808fbf07a.mp3?filename=lofi-study-112191.mp3";

/// Title of the built-in track
pub const DEFAULT_TRACK_TITLE: &str = "Lofi Study";

/// Canonical in-memory playback state for one journal
///
/// The playlist and track index are only reachable through methods so that
/// `current_track_index < playlist.len()` holds whenever the playlist is
/// non-empty. An empty playlist always has index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    playlist: Vec<PlaylistEntry>,
    current_track_index: usize,
    is_playing: bool,
    position_seconds: f64,
    last_updated: DateTime<Utc>,
}

impl PlaybackState {
    /// Create a paused state over the given playlist, starting at track 0
    pub fn with_playlist(playlist: Vec<PlaylistEntry>) -> Self {
        Self {
            playlist,
            current_track_index: 0,
            is_playing: false,
            position_seconds: 0.0,
            last_updated: Utc::now(),
        }
    }

    /// Ordered playlist
    pub fn playlist(&self) -> &[PlaylistEntry] {
        &self.playlist
    }

    /// Index of the active track
    pub fn current_track_index(&self) -> usize {
        self.current_track_index
    }

    /// Active entry, `None` only when the playlist is empty
    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.playlist.get(self.current_track_index)
    }

    /// Whether playback is intended to be running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Advisory playback offset of the active track
    pub fn position_seconds(&self) -> f64 {
        self.position_seconds
    }

    /// Timestamp of the last state-producing event
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Whether there is a track after the active one
    pub fn has_next(&self) -> bool {
        self.current_track_index + 1 < self.playlist.len()
    }

    /// Whether there is a track before the active one
    pub fn has_previous(&self) -> bool {
        self.current_track_index > 0
    }

    /// Replace the whole playlist and re-clamp the index
    pub fn set_playlist(&mut self, playlist: Vec<PlaylistEntry>) {
        self.playlist = playlist;
        self.current_track_index = self.current_track_index.min(self.max_index());
    }

    /// Set the active index, clamped into the playlist
    pub fn set_current_track_index(&mut self, index: usize) {
        self.current_track_index = index.min(self.max_index());
    }

    /// Set the active index from an untrusted signed value
    ///
    /// Negative values clamp to 0, oversized values to the last entry.
    pub fn set_current_track_index_lossy(&mut self, index: i64) {
        let index = usize::try_from(index.max(0)).unwrap_or(usize::MAX);
        self.set_current_track_index(index);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn set_position_seconds(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.position_seconds = seconds.max(0.0);
        }
    }

    /// Stamp the state with the current time
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Full remote projection of this state
    pub fn to_document(&self) -> RemoteDocument {
        RemoteDocument {
            is_playing: Some(self.is_playing),
            current_time: Some(self.position_seconds),
            playlist: Some(self.playlist.clone()),
            current_track_index: Some(self.current_track_index as i64),
            last_updated: Some(self.last_updated.to_rfc3339()),
        }
    }

    fn max_index(&self) -> usize {
        self.playlist.len().saturating_sub(1)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_playlist(vec![PlaylistEntry::with_id(
            "1",
            DEFAULT_TRACK_URL,
            DEFAULT_TRACK_TITLE,
        )])
    }
}

/// Remote document for one journal, as observed by a subscriber
///
/// Every field is optional: documents are written with merge semantics, so a
/// snapshot only carries the fields some client has written so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,

    /// Playback offset of the publisher in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<PlaylistEntry>>,

    /// Signed on the wire; clamped by the reader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_track_index: Option<i64>,

    /// ISO-8601 timestamp, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl RemoteDocument {
    /// Merge a partial update into this document, leaving absent fields alone
    pub fn merge(&mut self, update: &PlaybackUpdate) {
        if let Some(is_playing) = update.is_playing {
            self.is_playing = Some(is_playing);
        }
        if let Some(current_time) = update.current_time {
            self.current_time = Some(current_time);
        }
        if let Some(playlist) = &update.playlist {
            self.playlist = Some(playlist.clone());
        }
        if let Some(index) = update.current_track_index {
            self.current_track_index = Some(index as i64);
        }
        if let Some(at) = update.last_updated {
            self.last_updated = Some(at.to_rfc3339());
        }
    }
}

/// Partial update of a remote document
///
/// Only the populated fields are serialized, matching the store's merge
/// semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<PlaylistEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_track_index: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl PlaybackUpdate {
    /// Empty update stamped with the current time
    pub fn stamped() -> Self {
        Self {
            last_updated: Some(Utc::now()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<PlaylistEntry> {
        (0..n)
            .map(|i| PlaylistEntry::with_id(i.to_string(), format!("https://example.com/{i}.mp3"), format!("T{i}")))
            .collect()
    }

    #[test]
    fn default_state_has_builtin_track() {
        let state = PlaybackState::default();
        assert_eq!(state.playlist().len(), 1);
        assert_eq!(state.current_entry().unwrap().url, DEFAULT_TRACK_URL);
        assert_eq!(state.current_entry().unwrap().title, DEFAULT_TRACK_TITLE);
        assert!(!state.is_playing());
    }

    #[test]
    fn index_clamps_on_playlist_shrink() {
        let mut state = PlaybackState::with_playlist(entries(5));
        state.set_current_track_index(4);
        state.set_playlist(entries(2));
        assert_eq!(state.current_track_index(), 1);

        state.set_playlist(Vec::new());
        assert_eq!(state.current_track_index(), 0);
        assert!(state.current_entry().is_none());
    }

    #[test]
    fn lossy_index_handles_negative_and_huge() {
        let mut state = PlaybackState::with_playlist(entries(3));
        state.set_current_track_index_lossy(-4);
        assert_eq!(state.current_track_index(), 0);
        state.set_current_track_index_lossy(i64::MAX);
        assert_eq!(state.current_track_index(), 2);
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let mut state = PlaybackState::default();
        state.set_position_seconds(12.5);
        state.set_position_seconds(f64::NAN);
        assert_eq!(state.position_seconds(), 12.5);
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = PlaybackUpdate {
            is_playing: Some(true),
            current_track_index: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "isPlaying": true, "currentTrackIndex": 2 })
        );
    }

    #[test]
    fn document_tolerates_missing_fields() {
        let doc: RemoteDocument =
            serde_json::from_str(r#"{ "isPlaying": false, "currentTrackIndex": -1 }"#).unwrap();
        assert_eq!(doc.is_playing, Some(false));
        assert_eq!(doc.current_track_index, Some(-1));
        assert!(doc.playlist.is_none());
    }

    #[test]
    fn merge_leaves_absent_fields_untouched() {
        let mut doc = PlaybackState::with_playlist(entries(2)).to_document();
        doc.merge(&PlaybackUpdate {
            is_playing: Some(true),
            ..Default::default()
        });

        assert_eq!(doc.is_playing, Some(true));
        assert_eq!(doc.playlist.as_ref().map(Vec::len), Some(2));
        assert_eq!(doc.current_track_index, Some(0));
    }

    #[test]
    fn stamped_update_carries_only_timestamp() {
        let update = PlaybackUpdate::stamped();
        assert!(update.is_playing.is_none());
        assert!(update.playlist.is_none());
        assert!(update.current_track_index.is_none());
        assert!(update.last_updated.is_some());
    }
}
