//! Sync engine configuration

use chorus_core::{PlaylistEntry, DEFAULT_TRACK_TITLE, DEFAULT_TRACK_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the reconciliation engine and its sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// How long remote play/pause flips are treated as echoes after one
    /// was applied
    #[serde(default = "default_echo_window_ms")]
    pub echo_window_ms: u64,

    /// Native position difference (seconds) that triggers a seek
    #[serde(default = "default_drift_threshold_secs")]
    pub drift_threshold_secs: f64,

    /// How long a new session waits for the first remote snapshot before
    /// seeding; 0 only uses a snapshot that is already buffered
    #[serde(default)]
    pub seed_wait_ms: u64,

    /// Upper bound for draining queued publishes on shutdown
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,

    /// Track used when neither the remote document nor the cache has a
    /// playlist
    #[serde(default)]
    pub default_track: DefaultTrack,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            echo_window_ms: default_echo_window_ms(),
            drift_threshold_secs: default_drift_threshold_secs(),
            seed_wait_ms: 0,
            drain_timeout_ms: default_drain_timeout_ms(),
            default_track: DefaultTrack::default(),
        }
    }
}

impl SyncConfig {
    pub fn echo_window(&self) -> Duration {
        Duration::from_millis(self.echo_window_ms)
    }

    pub fn seed_wait(&self) -> Option<Duration> {
        (self.seed_wait_ms > 0).then(|| Duration::from_millis(self.seed_wait_ms))
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

/// Built-in fallback track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultTrack {
    pub url: String,
    pub title: String,
}

impl Default for DefaultTrack {
    fn default() -> Self {
        Self {
            url: DEFAULT_TRACK_URL.to_string(),
            title: DEFAULT_TRACK_TITLE.to_string(),
        }
    }
}

impl DefaultTrack {
    /// Single-entry playlist holding this track
    pub fn playlist(&self) -> Vec<PlaylistEntry> {
        vec![PlaylistEntry::with_id("1", &self.url, &self.title)]
    }
}

fn default_echo_window_ms() -> u64 {
    500
}

fn default_drift_threshold_secs() -> f64 {
    2.0
}

fn default_drain_timeout_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: SyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.echo_window(), Duration::from_millis(500));
        assert_eq!(config.drift_threshold_secs, 2.0);
        assert_eq!(config.default_track.title, "Lofi Study");
    }

    #[test]
    fn partial_override() {
        let config: SyncConfig =
            serde_json::from_str(r#"{ "echo_window_ms": 250, "default_track": { "url": "https://example.com/x.mp3", "title": "X" } }"#)
                .unwrap();
        assert_eq!(config.echo_window_ms, 250);
        assert_eq!(config.drift_threshold_secs, 2.0);
        assert_eq!(config.default_track.playlist()[0].url, "https://example.com/x.mp3");
    }
}
