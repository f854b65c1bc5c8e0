//! Chorus CLI
//!
//! Wiring shared by the `chorus` binary and its tests: configuration,
//! headless backends and session setup.

pub mod backend;
pub mod config;
pub mod error;

use crate::config::{CacheSettings, ChorusConfig, RemoteSettings};
use crate::error::Result;
use chorus_cache::{CacheMirror, FileStore, KeyValueStore};
use chorus_core::JournalId;
use chorus_playback::PlaybackControl;
use chorus_remote::{DisabledRemote, HttpDocumentStore, RemoteChannel};
use chorus_sync::{BackendFactory, SessionRegistry, SessionSnapshot};
use std::fmt::Write;
use std::sync::Arc;
use tracing::info;

/// Remote channel for the configured store, disabled without a URL
pub fn remote_channel(settings: &RemoteSettings) -> Result<Arc<dyn RemoteChannel>> {
    match settings.to_remote_config() {
        Some(config) => {
            info!(url = %config.url, "Remote sync enabled");
            Ok(Arc::new(HttpDocumentStore::new(config)?))
        }
        None => {
            info!("No remote store configured, running locally");
            Ok(Arc::new(DisabledRemote))
        }
    }
}

/// File-backed cache mirror
pub fn open_cache(settings: &CacheSettings) -> Result<CacheMirror> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&settings.dir)?);
    Ok(CacheMirror::new(store))
}

/// Registry with logging backends
pub fn build_registry(config: &ChorusConfig) -> Result<SessionRegistry> {
    let remote = remote_channel(&config.remote)?;
    let cache = open_cache(&config.cache)?;
    let backends: BackendFactory =
        Arc::new(|_: &JournalId| Box::new(backend::log_adapter()) as Box<dyn PlaybackControl>);

    Ok(SessionRegistry::new(remote, cache, backends, config.sync.clone()))
}

/// Human-readable session status
pub fn render_status(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let state = if snapshot.is_playing { "playing" } else { "paused" };

    let _ = writeln!(out, "Journal: {}", snapshot.journal);
    let _ = writeln!(
        out,
        "Now {}: {} ({})",
        state,
        snapshot.current_title(),
        snapshot.track_label()
    );

    for (index, entry) in snapshot.playlist.iter().enumerate() {
        let marker = if index == snapshot.current_track_index { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:>2}. {} [{}] {}",
            marker,
            index + 1,
            entry.title,
            entry.id,
            entry.url
        );
    }

    out
}
