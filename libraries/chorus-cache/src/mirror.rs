//! Journal playlist mirror over a key-value store

use crate::store::KeyValueStore;
use chorus_core::{JournalId, PlaylistEntry};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key holding the serialized playlist of a journal
pub fn playlist_key(journal: &JournalId) -> String {
    format!("music_playlist_{journal}")
}

/// Key holding the active track index of a journal
pub fn index_key(journal: &JournalId) -> String {
    format!("music_current_{journal}")
}

/// Last-known playlist and index of a journal
///
/// Either half may be absent independently; corrupt values read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedPlayback {
    pub playlist: Option<Vec<PlaylistEntry>>,
    pub current_track_index: Option<usize>,
}

/// Best-effort mirror of playback state into local storage
///
/// Nothing here returns an error: failed writes are logged and dropped,
/// unreadable data is reported as missing.
#[derive(Clone)]
pub struct CacheMirror {
    store: Arc<dyn KeyValueStore>,
}

impl CacheMirror {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist the playlist and index of a journal
    pub fn save(&self, journal: &JournalId, playlist: &[PlaylistEntry], current_track_index: usize) {
        match serde_json::to_string(playlist) {
            Ok(json) => {
                if let Err(e) = self.store.set(&playlist_key(journal), &json) {
                    warn!(journal = %journal, error = %e, "Failed to cache playlist");
                }
            }
            Err(e) => warn!(journal = %journal, error = %e, "Failed to serialize playlist"),
        }

        if let Err(e) = self
            .store
            .set(&index_key(journal), &current_track_index.to_string())
        {
            warn!(journal = %journal, error = %e, "Failed to cache track index");
        }
    }

    /// Read back whatever was cached for a journal
    pub fn load(&self, journal: &JournalId) -> CachedPlayback {
        let playlist = self
            .read(&playlist_key(journal))
            .and_then(|raw| match serde_json::from_str::<Vec<PlaylistEntry>>(&raw) {
                Ok(entries) if !entries.is_empty() => Some(entries),
                Ok(_) => None,
                Err(e) => {
                    debug!(journal = %journal, error = %e, "Ignoring corrupt cached playlist");
                    None
                }
            });

        let current_track_index = self.read(&index_key(journal)).and_then(|raw| {
            let parsed = raw.trim().parse::<usize>().ok();
            if parsed.is_none() {
                debug!(journal = %journal, raw = %raw, "Ignoring corrupt cached index");
            }
            parsed
        });

        CachedPlayback {
            playlist,
            current_track_index,
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for CacheMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheMirror").finish_non_exhaustive()
    }
}
