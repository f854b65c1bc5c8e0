//! Reconciliation engine - canonical playback state for one journal
//!
//! Applies local intents optimistically and merges remote snapshots,
//! driving a [`PlaybackControl`] backend and mirroring to the local cache.
//!
//! The engine is synchronous. Every local intent returns the partial update
//! that should be published; the caller decides how (and whether) to send it.

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::snapshot::SessionSnapshot;
use chorus_cache::CacheMirror;
use chorus_core::{JournalId, PlaybackState, PlaybackUpdate, PlaylistEntry, RemoteDocument};
use chorus_playback::{PlaybackControl, PlaybackIntent, PlaybackTarget, TargetKind};
use chorus_remote::RemoteSnapshot;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// Where the initial playlist came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Remote,
    Cache,
    Default,
}

/// What a remote snapshot did to the local state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutcome {
    /// Remote play state was applied
    pub play_state_changed: bool,
    /// Play state arrived inside the echo window, position left alone
    pub drift_deferred: bool,
    pub playlist_replaced: bool,
    pub index_changed: bool,
    /// Native position was forced to the remote offset
    pub drift_corrected: bool,
    pub backend_commanded: bool,
}

impl RemoteOutcome {
    pub fn changed_state(&self) -> bool {
        self.play_state_changed || self.playlist_replaced || self.index_changed
    }
}

/// Owner of one journal's playback state
pub struct ReconciliationEngine {
    journal: JournalId,
    state: PlaybackState,
    backend: Box<dyn PlaybackControl>,
    cache: CacheMirror,
    config: SyncConfig,

    /// Positions carried by remote play/pause flips before this instant
    /// may be our own stale echoes
    echo_suppressed_until: Option<Instant>,
}

impl ReconciliationEngine {
    /// Create an engine holding the configured default track
    pub fn new(
        journal: JournalId,
        backend: Box<dyn PlaybackControl>,
        cache: CacheMirror,
        config: SyncConfig,
    ) -> Self {
        let state = PlaybackState::with_playlist(config.default_track.playlist());
        Self {
            journal,
            state,
            backend,
            cache,
            config,
            echo_suppressed_until: None,
        }
    }

    pub fn journal(&self) -> &JournalId {
        &self.journal
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.journal, &self.state)
    }

    /// Whether remote positions are currently treated as possible echoes
    pub fn is_suppressing_echoes(&self, now: Instant) -> bool {
        self.echo_suppressed_until.is_some_and(|until| now < until)
    }

    // ===== Seeding =====

    /// Pick the initial playlist
    ///
    /// A remote snapshot that already carries a playlist wins, then the
    /// cache, then the default track. Only playlist and index are seeded;
    /// the caller feeds the same snapshot through [`Self::apply_remote`]
    /// afterwards so the play state takes the normal path.
    pub fn seed(&mut self, buffered: Option<&RemoteDocument>) -> SeedSource {
        let remote_playlist = buffered
            .and_then(|doc| doc.playlist.as_ref().map(|playlist| (doc, playlist)))
            .filter(|(_, playlist)| !playlist.is_empty());

        let source = if let Some((doc, playlist)) = remote_playlist {
            self.state.set_playlist(playlist.clone());
            self.state
                .set_current_track_index_lossy(doc.current_track_index.unwrap_or(0));
            SeedSource::Remote
        } else {
            let cached = self.cache.load(&self.journal);
            match cached.playlist {
                Some(playlist) => {
                    self.state.set_playlist(playlist);
                    self.state
                        .set_current_track_index(cached.current_track_index.unwrap_or(0));
                    SeedSource::Cache
                }
                None => SeedSource::Default,
            }
        };

        info!(
            journal = %self.journal,
            source = ?source,
            tracks = self.state.playlist().len(),
            index = self.state.current_track_index(),
            "Seeded playback state"
        );
        self.mirror();
        source
    }

    // ===== Local intents =====

    /// Flip play/pause
    ///
    /// Always proceeds, and (re)opens the echo window for the update it
    /// publishes.
    pub fn toggle_play(&mut self) -> PlaybackUpdate {
        self.echo_suppressed_until = Some(Instant::now() + self.config.echo_window());

        let playing = !self.state.is_playing();
        self.state.set_playing(playing);
        self.command_backend();

        let position = self.backend.native_position().unwrap_or(0.0);
        self.state.set_position_seconds(position);
        self.state.touch();

        debug!(journal = %self.journal, playing, position, "Toggled playback");
        self.mirror();

        PlaybackUpdate {
            is_playing: Some(playing),
            current_time: Some(position),
            playlist: Some(self.state.playlist().to_vec()),
            current_track_index: Some(self.state.current_track_index()),
            last_updated: Some(self.state.last_updated()),
        }
    }

    /// Jump to a track and start playing it; out of range is a no-op
    pub fn select_track(&mut self, index: usize) -> Option<PlaybackUpdate> {
        if index >= self.state.playlist().len() {
            debug!(journal = %self.journal, index, "Ignoring out-of-range track selection");
            return None;
        }

        self.state.set_current_track_index(index);
        self.state.set_playing(true);
        self.state.touch();
        self.command_backend();
        self.mirror();

        debug!(journal = %self.journal, index, "Selected track");
        Some(PlaybackUpdate {
            is_playing: Some(true),
            current_track_index: Some(index),
            last_updated: Some(self.state.last_updated()),
            ..Default::default()
        })
    }

    /// Advance one track, no wraparound
    pub fn next_track(&mut self) -> Option<PlaybackUpdate> {
        if !self.state.has_next() {
            trace!(journal = %self.journal, "Already at last track");
            return None;
        }
        Some(self.move_to(self.state.current_track_index() + 1))
    }

    /// Go back one track, no wraparound
    pub fn previous_track(&mut self) -> Option<PlaybackUpdate> {
        if !self.state.has_previous() {
            trace!(journal = %self.journal, "Already at first track");
            return None;
        }
        Some(self.move_to(self.state.current_track_index() - 1))
    }

    /// Native track finished: advance if possible, otherwise nothing changes
    pub fn track_ended(&mut self) -> Option<PlaybackUpdate> {
        let update = self.next_track();
        if update.is_none() {
            debug!(journal = %self.journal, "Playlist finished");
        }
        update
    }

    /// Append an entry
    ///
    /// A blank title becomes `Track <n>`, n being the new playlist length.
    pub fn add_entry(&mut self, url: &str, title: Option<&str>) -> Result<(PlaylistEntry, PlaybackUpdate)> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SyncError::InvalidInput("URL cannot be empty".into()));
        }

        let mut playlist = self.state.playlist().to_vec();
        let title = match title.map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Track {}", playlist.len() + 1),
        };

        let entry = PlaylistEntry::new(url, title);
        playlist.push(entry.clone());
        self.state.set_playlist(playlist);
        self.state.touch();
        self.mirror();

        info!(journal = %self.journal, id = %entry.id, title = %entry.title, "Added playlist entry");
        let update = PlaybackUpdate {
            playlist: Some(self.state.playlist().to_vec()),
            last_updated: Some(self.state.last_updated()),
            ..Default::default()
        };
        Ok((entry, update))
    }

    /// Remove an entry by id; unknown ids are a no-op
    ///
    /// The index is kept unless it falls off the end, in which case it
    /// clamps to the new last entry.
    pub fn remove_entry(&mut self, id: &str) -> Option<PlaybackUpdate> {
        if !self.state.playlist().iter().any(|entry| entry.id == id) {
            debug!(journal = %self.journal, id, "Ignoring removal of unknown entry");
            return None;
        }

        let before = self.state.current_entry().cloned();
        let playlist: Vec<PlaylistEntry> = self
            .state
            .playlist()
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();

        self.state.set_playlist(playlist);
        self.state.touch();

        if self.state.current_entry() != before.as_ref() {
            self.command_backend();
        }
        self.mirror();

        info!(journal = %self.journal, id, remaining = self.state.playlist().len(), "Removed playlist entry");
        Some(PlaybackUpdate {
            playlist: Some(self.state.playlist().to_vec()),
            current_track_index: Some(self.state.current_track_index()),
            last_updated: Some(self.state.last_updated()),
            ..Default::default()
        })
    }

    /// Embedded frame finished loading: resend play if playback is intended
    pub fn frame_ready(&mut self) {
        let embedded = self
            .state
            .current_entry()
            .is_some_and(|entry| PlaybackTarget::for_url(&entry.url).kind() == TargetKind::EmbeddedFrame);

        if embedded && self.state.is_playing() {
            trace!(journal = %self.journal, "Frame ready, resending play");
            self.command_backend();
        }
    }

    // ===== Remote events =====

    pub fn apply_remote(&mut self, snapshot: RemoteSnapshot) -> RemoteOutcome {
        self.apply_remote_at(snapshot, Instant::now())
    }

    /// Merge one remote snapshot observed at `now`
    pub fn apply_remote_at(&mut self, snapshot: RemoteSnapshot, now: Instant) -> RemoteOutcome {
        let mut outcome = RemoteOutcome::default();

        let Some(doc) = snapshot else {
            trace!(journal = %self.journal, "Remote document does not exist yet");
            return outcome;
        };

        if self.echo_suppressed_until.is_some_and(|until| now >= until) {
            self.echo_suppressed_until = None;
        }

        let before_entry = self.state.current_entry().cloned();
        let before_playing = self.state.is_playing();

        // A differing value is always taken. Remote channels only report
        // changes, so a dropped value would never be corrected.
        if let Some(remote_playing) = doc.is_playing {
            if remote_playing != before_playing {
                self.state.set_playing(remote_playing);
                outcome.play_state_changed = true;
                outcome.drift_deferred = self.echo_suppressed_until.is_some();
                self.echo_suppressed_until = Some(now + self.config.echo_window());
            }
        }

        if let Some(playlist) = doc.playlist {
            if playlist.as_slice() != self.state.playlist() {
                outcome.playlist_replaced = true;
            }
            self.state.set_playlist(playlist);
        }

        if let Some(index) = doc.current_track_index {
            let previous = self.state.current_track_index();
            self.state.set_current_track_index_lossy(index);
            outcome.index_changed = self.state.current_track_index() != previous;
        }

        if self.state.current_entry() != before_entry.as_ref()
            || self.state.is_playing() != before_playing
        {
            self.command_backend();
            outcome.backend_commanded = true;
        }

        if outcome.drift_deferred {
            trace!(journal = %self.journal, "Play state inside echo window, skipping drift check");
        } else if outcome.play_state_changed {
            outcome.drift_corrected = self.correct_drift(doc.current_time);
        }

        if outcome.changed_state() {
            self.state.touch();
            self.mirror();
        }

        debug!(
            journal = %self.journal,
            playing = self.state.is_playing(),
            index = self.state.current_track_index(),
            outcome = ?outcome,
            "Applied remote snapshot"
        );
        outcome
    }

    // ===== Internals =====

    fn move_to(&mut self, index: usize) -> PlaybackUpdate {
        self.state.set_current_track_index(index);
        self.state.touch();
        self.command_backend();
        self.mirror();

        debug!(journal = %self.journal, index, "Moved to track");
        PlaybackUpdate {
            current_track_index: Some(self.state.current_track_index()),
            last_updated: Some(self.state.last_updated()),
            ..Default::default()
        }
    }

    fn command_backend(&mut self) {
        let intent = PlaybackIntent::from_playing(self.state.is_playing());
        self.backend.command(self.state.current_entry(), intent);
    }

    fn correct_drift(&mut self, remote_time: Option<f64>) -> bool {
        let (Some(local), Some(remote)) = (self.backend.native_position(), remote_time) else {
            return false;
        };
        if !remote.is_finite() || (local - remote).abs() <= self.config.drift_threshold_secs {
            return false;
        }

        debug!(journal = %self.journal, local, remote, "Correcting native drift");
        self.backend.seek_native(remote);
        self.state.set_position_seconds(remote);
        true
    }

    fn mirror(&self) {
        self.cache.save(
            &self.journal,
            self.state.playlist(),
            self.state.current_track_index(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_cache::{KeyValueStore, MemoryStore};
    use chorus_playback::testing::{BackendCall, BackendRecorder};
    use chorus_playback::PlaybackAdapter;
    use std::sync::Arc;
    use std::time::Duration;

    fn entries(n: usize) -> Vec<PlaylistEntry> {
        (0..n)
            .map(|i| {
                PlaylistEntry::with_id(
                    format!("e{i}"),
                    format!("https://example.com/{i}.mp3"),
                    format!("T{i}"),
                )
            })
            .collect()
    }

    struct Fixture {
        engine: ReconciliationEngine,
        recorder: BackendRecorder,
        cache: CacheMirror,
    }

    fn fixture(n: usize) -> Fixture {
        let recorder = BackendRecorder::new();
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let cache = CacheMirror::new(store);
        let backend = PlaybackAdapter::new(recorder.audio_output(), recorder.frame_channel());
        let mut engine = ReconciliationEngine::new(
            JournalId::parse("vol1").unwrap(),
            Box::new(backend),
            cache.clone(),
            SyncConfig::default(),
        );
        engine.state.set_playlist(entries(n));
        Fixture {
            engine,
            recorder,
            cache,
        }
    }

    fn remote(f: impl FnOnce(&mut RemoteDocument)) -> RemoteSnapshot {
        let mut doc = RemoteDocument::default();
        f(&mut doc);
        Some(doc)
    }

    #[test]
    fn new_engine_holds_default_track() {
        let f = fixture(0);
        let engine = ReconciliationEngine::new(
            JournalId::parse("x").unwrap(),
            Box::new(PlaybackAdapter::new(f.recorder.audio_output(), f.recorder.frame_channel())),
            f.cache.clone(),
            SyncConfig::default(),
        );
        assert_eq!(engine.state().playlist().len(), 1);
        assert_eq!(engine.state().playlist()[0].title, "Lofi Study");
        assert!(!engine.state().is_playing());
    }

    #[test]
    fn toggle_publishes_full_update() {
        let mut f = fixture(2);
        let update = f.engine.toggle_play();

        assert_eq!(update.is_playing, Some(true));
        assert_eq!(update.current_time, Some(0.0));
        assert_eq!(update.playlist.as_ref().map(Vec::len), Some(2));
        assert_eq!(update.current_track_index, Some(0));
        assert!(update.last_updated.is_some());
        assert_eq!(
            f.recorder.calls(),
            vec![
                BackendCall::Load("https://example.com/0.mp3".into()),
                BackendCall::Play
            ]
        );
    }

    #[test]
    fn toggle_reports_native_position() {
        let mut f = fixture(1);
        f.engine.toggle_play();
        f.recorder.set_position(42.0);

        let update = f.engine.toggle_play();
        assert_eq!(update.is_playing, Some(false));
        assert_eq!(update.current_time, Some(42.0));
    }

    #[test]
    fn rejected_play_keeps_intent() {
        let mut f = fixture(1);
        f.recorder.set_reject_play(true);
        f.engine.toggle_play();
        assert!(f.engine.state().is_playing());
    }

    #[test]
    fn select_in_range_plays() {
        let mut f = fixture(3);
        let update = f.engine.select_track(2).unwrap();

        assert_eq!(update.current_track_index, Some(2));
        assert_eq!(update.is_playing, Some(true));
        assert!(update.playlist.is_none());
        assert!(f.engine.state().is_playing());
        assert_eq!(f.engine.state().current_track_index(), 2);
    }

    #[test]
    fn select_out_of_range_is_noop() {
        let mut f = fixture(3);
        assert!(f.engine.select_track(3).is_none());
        assert_eq!(f.engine.state().current_track_index(), 0);
        assert!(!f.engine.state().is_playing());
        assert!(f.recorder.calls().is_empty());
    }

    #[test]
    fn next_and_previous_stop_at_boundaries() {
        let mut f = fixture(2);
        assert!(f.engine.previous_track().is_none());

        let update = f.engine.next_track().unwrap();
        assert_eq!(update.current_track_index, Some(1));
        assert!(update.is_playing.is_none());

        assert!(f.engine.next_track().is_none());
        assert_eq!(f.engine.previous_track().unwrap().current_track_index, Some(0));
    }

    #[test]
    fn add_rejects_blank_url() {
        let mut f = fixture(1);
        let result = f.engine.add_entry("   ", Some("x"));
        assert!(matches!(result, Err(SyncError::InvalidInput(_))));
        assert_eq!(f.engine.state().playlist().len(), 1);
    }

    #[test]
    fn add_defaults_title_to_track_number() {
        let mut f = fixture(2);
        let (entry, update) = f.engine.add_entry("https://example.com/new.mp3", None).unwrap();
        assert_eq!(entry.title, "Track 3");
        assert_eq!(update.playlist.as_ref().map(Vec::len), Some(3));
        assert!(update.current_track_index.is_none());

        let (entry, _) = f.engine.add_entry("https://example.com/b.mp3", Some("  ")).unwrap();
        assert_eq!(entry.title, "Track 4");
    }

    #[test]
    fn remove_last_entry_at_index_clamps() {
        let mut f = fixture(3);
        f.engine.select_track(2);
        f.recorder.clear();

        let update = f.engine.remove_entry("e2").unwrap();
        assert_eq!(update.current_track_index, Some(1));
        assert_eq!(f.engine.state().current_track_index(), 1);
        // Current entry changed, so the backend follows
        assert_eq!(
            f.recorder.calls(),
            vec![
                BackendCall::Load("https://example.com/1.mp3".into()),
                BackendCall::Play
            ]
        );
    }

    #[test]
    fn remove_other_entry_keeps_backend_alone() {
        let mut f = fixture(3);
        f.engine.select_track(0);
        f.recorder.clear();

        f.engine.remove_entry("e2").unwrap();
        assert_eq!(f.engine.state().current_track_index(), 0);
        assert!(f.recorder.calls().is_empty());
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut f = fixture(2);
        assert!(f.engine.remove_entry("missing").is_none());
        assert_eq!(f.engine.state().playlist().len(), 2);
    }

    #[test]
    fn remove_only_entry_pauses_backend() {
        let mut f = fixture(1);
        f.engine.toggle_play();
        f.recorder.clear();

        f.engine.remove_entry("e0").unwrap();
        assert!(f.engine.state().playlist().is_empty());
        assert_eq!(f.engine.state().current_track_index(), 0);
        assert_eq!(f.recorder.calls(), vec![BackendCall::Pause]);
    }

    #[test]
    fn track_end_advances_then_stops() {
        let mut f = fixture(2);
        f.engine.toggle_play();

        let update = f.engine.track_ended().unwrap();
        assert_eq!(update.current_track_index, Some(1));
        assert!(f.engine.state().is_playing());

        assert!(f.engine.track_ended().is_none());
        assert_eq!(f.engine.state().current_track_index(), 1);
        assert!(f.engine.state().is_playing());
    }

    #[test]
    fn remote_same_play_state_is_ignored() {
        let mut f = fixture(2);
        f.engine.select_track(1);
        f.recorder.clear();

        let outcome = f.engine.apply_remote(remote(|d| {
            d.is_playing = Some(true);
            d.current_track_index = Some(1);
            d.current_time = Some(100.0);
        }));

        assert!(!outcome.backend_commanded);
        assert!(!outcome.drift_corrected);
        assert_eq!(f.recorder.playback_commands(), 0);
    }

    #[test]
    fn remote_play_opens_echo_window() {
        let mut f = fixture(1);
        let start = Instant::now();

        let outcome = f.engine.apply_remote_at(remote(|d| d.is_playing = Some(true)), start);
        assert!(outcome.play_state_changed);
        assert!(outcome.backend_commanded);
        assert!(!outcome.drift_deferred);
        assert!(f.engine.is_suppressing_echoes(start));
        f.recorder.set_position(10.0);
        f.recorder.clear();

        // Another client pauses right away: applied, but its position is not trusted
        let pause = f.engine.apply_remote_at(
            remote(|d| {
                d.is_playing = Some(false);
                d.current_time = Some(40.0);
            }),
            start + Duration::from_millis(100),
        );
        assert!(pause.play_state_changed);
        assert!(pause.drift_deferred);
        assert!(!pause.drift_corrected);
        assert!(!f.engine.state().is_playing());
        assert_eq!(f.recorder.calls(), vec![BackendCall::Pause]);

        let later = f.engine.apply_remote_at(
            remote(|d| {
                d.is_playing = Some(true);
                d.current_time = Some(40.0);
            }),
            start + Duration::from_millis(700),
        );
        assert!(later.play_state_changed);
        assert!(later.drift_corrected);
        assert!(f.engine.state().is_playing());
    }

    #[test]
    fn stale_echo_then_final_value_converges() {
        let mut f = fixture(1);
        f.engine.toggle_play();
        f.engine.toggle_play();
        let now = Instant::now();

        // Our own two publishes come back in order
        f.engine.apply_remote_at(remote(|d| d.is_playing = Some(true)), now);
        assert!(f.engine.state().is_playing());
        let last = f
            .engine
            .apply_remote_at(remote(|d| d.is_playing = Some(false)), now + Duration::from_millis(5));
        assert!(last.play_state_changed);
        assert!(!f.engine.state().is_playing());
    }

    #[test]
    fn local_toggle_opens_echo_window() {
        let mut f = fixture(1);
        let start = Instant::now();

        f.engine.apply_remote_at(remote(|d| d.is_playing = Some(true)), start);
        f.engine.toggle_play();
        assert!(!f.engine.state().is_playing());
        assert!(f.engine.is_suppressing_echoes(Instant::now()));
    }

    #[test]
    fn remote_playlist_overwrites_inside_window() {
        let mut f = fixture(3);
        let start = Instant::now();
        f.engine.select_track(2);

        f.engine.apply_remote_at(remote(|d| d.is_playing = Some(false)), start);
        let outcome = f.engine.apply_remote_at(
            remote(|d| {
                d.is_playing = Some(true);
                d.playlist = Some(entries(1));
            }),
            start + Duration::from_millis(10),
        );

        assert!(outcome.play_state_changed);
        assert!(outcome.playlist_replaced);
        assert_eq!(f.engine.state().playlist().len(), 1);
        assert_eq!(f.engine.state().current_track_index(), 0);
    }

    #[test]
    fn remote_negative_index_clamps() {
        let mut f = fixture(3);
        f.engine.select_track(1);

        f.engine.apply_remote(remote(|d| d.current_track_index = Some(-4)));
        assert_eq!(f.engine.state().current_track_index(), 0);

        f.engine.apply_remote(remote(|d| d.current_track_index = Some(99)));
        assert_eq!(f.engine.state().current_track_index(), 2);
    }

    #[test]
    fn drift_beyond_threshold_seeks() {
        let mut f = fixture(1);
        f.engine.toggle_play();
        f.recorder.set_position(10.0);
        f.recorder.clear();

        let outcome = f.engine.apply_remote_at(
            remote(|d| {
                d.is_playing = Some(false);
                d.current_time = Some(30.0);
            }),
            Instant::now() + Duration::from_secs(1),
        );

        assert!(outcome.drift_corrected);
        assert_eq!(f.recorder.calls(), vec![BackendCall::Pause, BackendCall::Seek(30.0)]);
    }

    #[test]
    fn drift_within_threshold_is_left_alone() {
        let mut f = fixture(1);
        f.engine.toggle_play();
        f.recorder.set_position(10.0);

        let outcome = f.engine.apply_remote_at(
            remote(|d| {
                d.is_playing = Some(false);
                d.current_time = Some(11.5);
            }),
            Instant::now() + Duration::from_secs(1),
        );

        assert!(outcome.play_state_changed);
        assert!(!outcome.drift_corrected);
    }

    #[test]
    fn absent_document_changes_nothing() {
        let mut f = fixture(2);
        let outcome = f.engine.apply_remote(None);
        assert_eq!(outcome, RemoteOutcome::default());
    }

    #[test]
    fn intents_mirror_to_cache() {
        let mut f = fixture(2);
        f.engine.next_track();

        let cached = f.cache.load(f.engine.journal());
        assert_eq!(cached.playlist.map(|p| p.len()), Some(2));
        assert_eq!(cached.current_track_index, Some(1));
    }

    #[test]
    fn seed_prefers_remote_then_cache() {
        let mut f = fixture(0);
        f.cache.save(f.engine.journal(), &entries(3), 2);

        let doc = RemoteDocument {
            playlist: Some(entries(2)),
            current_track_index: Some(1),
            ..Default::default()
        };
        assert_eq!(f.engine.seed(Some(&doc)), SeedSource::Remote);
        assert_eq!(f.engine.state().playlist().len(), 2);
        assert_eq!(f.engine.state().current_track_index(), 1);

        let mut g = fixture(0);
        g.cache.save(g.engine.journal(), &entries(3), 2);
        let empty_remote = RemoteDocument {
            is_playing: Some(true),
            ..Default::default()
        };
        assert_eq!(g.engine.seed(Some(&empty_remote)), SeedSource::Cache);
        assert_eq!(g.engine.state().current_track_index(), 2);
    }

    #[test]
    fn frame_ready_resends_play() {
        let mut f = fixture(0);
        f.engine
            .add_entry("https://youtu.be/ABC123", Some("Video"))
            .unwrap();
        f.engine.toggle_play();
        f.recorder.clear();

        f.engine.frame_ready();
        assert_eq!(f.recorder.playback_commands(), 1);
    }
}
