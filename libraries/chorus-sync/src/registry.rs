//! Registry of live sessions keyed by journal

use crate::config::SyncConfig;
use crate::session::{Session, SessionHandle};
use chorus_cache::CacheMirror;
use chorus_core::JournalId;
use chorus_playback::PlaybackControl;
use chorus_remote::RemoteChannel;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Builds the playback backend for a newly opened session
pub type BackendFactory = Arc<dyn Fn(&JournalId) -> Box<dyn PlaybackControl> + Send + Sync>;

/// At most one live session per journal
pub struct SessionRegistry {
    remote: Arc<dyn RemoteChannel>,
    cache: CacheMirror,
    backends: BackendFactory,
    config: SyncConfig,
    sessions: Mutex<HashMap<JournalId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new(
        remote: Arc<dyn RemoteChannel>,
        cache: CacheMirror,
        backends: BackendFactory,
        config: SyncConfig,
    ) -> Self {
        Self {
            remote,
            cache,
            backends,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the live session for a journal, starting one if needed
    ///
    /// The lock is not held while a session starts, so a slow subscription
    /// for one journal does not hold up the others.
    pub async fn open(&self, journal: &JournalId) -> SessionHandle {
        if let Some(handle) = self.live(journal).await {
            return handle;
        }

        let handle = Session::start(
            journal.clone(),
            (self.backends)(journal),
            self.cache.clone(),
            Arc::clone(&self.remote),
            self.config.clone(),
        )
        .await;

        let mut sessions = self.sessions.lock().await;
        if let Some(existing) = sessions.get(journal).filter(|h| !h.is_closed()).cloned() {
            drop(sessions);
            debug!(journal = %journal, "Session opened concurrently, keeping the first");
            let _ = handle.shutdown().await;
            return existing;
        }
        sessions.insert(journal.clone(), handle.clone());
        handle
    }

    async fn live(&self, journal: &JournalId) -> Option<SessionHandle> {
        let sessions = self.sessions.lock().await;
        let handle = sessions.get(journal)?;
        if handle.is_closed() {
            debug!(journal = %journal, "Replacing stopped session");
            return None;
        }
        Some(handle.clone())
    }

    /// Stop and forget a journal's session; false when none was open
    pub async fn close(&self, journal: &JournalId) -> bool {
        let handle = self.sessions.lock().await.remove(journal);
        match handle {
            Some(handle) => {
                // Shutdown is idempotent; an already-stopped actor is fine
                let _ = handle.shutdown().await;
                true
            }
            None => false,
        }
    }

    /// Stop every session
    pub async fn close_all(&self) {
        let handles: Vec<SessionHandle> = self.sessions.lock().await.drain().map(|(_, h)| h).collect();
        for handle in handles {
            let _ = handle.shutdown().await;
        }
    }

    /// Journals with a registered session
    pub async fn journals(&self) -> Vec<JournalId> {
        self.sessions.lock().await.keys().cloned().collect()
    }
}
