//! In-process document store
//!
//! Several sessions sharing one `MemoryDocumentStore` behave like clients of
//! a real store: every publish is merged and fanned out to all subscribers
//! of that journal, including the publisher itself.

use crate::channel::RemoteChannel;
use crate::error::{RemoteError, Result};
use crate::subscription::{RemoteSnapshot, Subscription, EVENT_BUFFER};
use async_trait::async_trait;
use chorus_core::{JournalId, PlaybackUpdate, RemoteDocument};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

const CHANGE_BUFFER: usize = 256;

struct Inner {
    documents: Mutex<HashMap<JournalId, RemoteDocument>>,
    changes: broadcast::Sender<(JournalId, RemoteDocument)>,
    offline: AtomicBool,
    publishes: AtomicUsize,
}

/// Shared in-memory document store
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            inner: Arc::new(Inner {
                documents: Mutex::new(HashMap::new()),
                changes,
                offline: AtomicBool::new(false),
                publishes: AtomicUsize::new(0),
            }),
        }
    }

    /// Current document of a journal
    pub fn document(&self, journal: &JournalId) -> RemoteSnapshot {
        self.documents().get(journal).cloned()
    }

    /// Simulate an outage: subscribes and publishes fail while offline
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of publishes accepted so far
    pub fn publish_count(&self) -> usize {
        self.inner.publishes.load(Ordering::SeqCst)
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<JournalId, RemoteDocument>> {
        self.inner
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_online(&self) -> Result<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("store is offline".into()));
        }
        Ok(())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteChannel for MemoryDocumentStore {
    async fn subscribe(&self, journal: &JournalId) -> Result<Subscription> {
        self.ensure_online()?;

        // Subscribe before reading so no change slips between the two
        let mut changes = self.inner.changes.subscribe();
        let initial = self.document(journal);

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let store = self.clone();
        let watched = journal.clone();

        let listener = tokio::spawn(async move {
            if tx.send(initial).await.is_err() {
                return;
            }

            loop {
                let snapshot = match changes.recv().await {
                    Ok((changed, document)) if changed == watched => Some(document),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(journal = %watched, skipped, "Subscriber lagged, resending latest");
                        store.document(&watched)
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                if tx.send(snapshot).await.is_err() {
                    break;
                }
            }
        });

        debug!(journal = %journal, "Subscribed to in-memory document");
        Ok(Subscription::new(journal.clone(), rx, listener))
    }

    async fn publish(&self, journal: &JournalId, update: &PlaybackUpdate) -> Result<()> {
        self.ensure_online()?;

        let merged = {
            let mut documents = self.documents();
            let document = documents.entry(journal.clone()).or_default();
            document.merge(update);
            document.clone()
        };

        self.inner.publishes.fetch_add(1, Ordering::SeqCst);
        // No receivers is fine: nobody is listening yet
        let _ = self.inner.changes.send((journal.clone(), merged));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::PlaylistEntry;
    use std::time::Duration;

    fn journal(id: &str) -> JournalId {
        JournalId::parse(id).unwrap()
    }

    async fn next(sub: &mut Subscription) -> RemoteSnapshot {
        tokio::time::timeout(Duration::from_secs(2), sub.next())
            .await
            .expect("timed out waiting for snapshot")
            .expect("subscription ended")
    }

    #[tokio::test]
    async fn first_snapshot_reports_missing_document() {
        let store = MemoryDocumentStore::new();
        let mut sub = store.subscribe(&journal("vol1")).await.unwrap();
        assert_eq!(next(&mut sub).await, None);
    }

    #[tokio::test]
    async fn publish_merges_and_fans_out() {
        let store = MemoryDocumentStore::new();
        let vol1 = journal("vol1");
        let mut sub = store.subscribe(&vol1).await.unwrap();
        assert_eq!(next(&mut sub).await, None);

        let playlist = vec![PlaylistEntry::with_id("a", "https://example.com/a.mp3", "A")];
        store
            .publish(
                &vol1,
                &PlaybackUpdate {
                    playlist: Some(playlist.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .publish(
                &vol1,
                &PlaybackUpdate {
                    is_playing: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let first = next(&mut sub).await.unwrap();
        assert_eq!(first.playlist.as_ref(), Some(&playlist));
        assert_eq!(first.is_playing, None);

        let second = next(&mut sub).await.unwrap();
        assert_eq!(second.playlist.as_ref(), Some(&playlist));
        assert_eq!(second.is_playing, Some(true));
        assert_eq!(store.publish_count(), 2);
    }

    #[tokio::test]
    async fn other_journals_are_not_delivered() {
        let store = MemoryDocumentStore::new();
        let mut sub = store.subscribe(&journal("vol1")).await.unwrap();
        assert_eq!(next(&mut sub).await, None);

        store
            .publish(&journal("vol2"), &PlaybackUpdate::stamped())
            .await
            .unwrap();
        assert!(tokio::time::timeout(Duration::from_millis(50), sub.next())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn offline_store_rejects_requests() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);

        let vol1 = journal("vol1");
        assert!(matches!(
            store.publish(&vol1, &PlaybackUpdate::stamped()).await,
            Err(RemoteError::Unavailable(_))
        ));
        assert!(store.subscribe(&vol1).await.is_err());
        assert_eq!(store.document(&vol1), None);

        store.set_offline(false);
        store.publish(&vol1, &PlaybackUpdate::stamped()).await.unwrap();
        assert!(store.document(&vol1).is_some());
    }
}
