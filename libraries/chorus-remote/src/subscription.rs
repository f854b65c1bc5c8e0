//! Live subscription handle

use chorus_core::{JournalId, RemoteDocument};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// One observed state of a remote document
///
/// `None` means the document does not exist (yet).
pub type RemoteSnapshot = Option<RemoteDocument>;

/// Capacity of the per-subscription event buffer
pub(crate) const EVENT_BUFFER: usize = 64;

/// Long-lived listener on one journal document
///
/// Snapshots are delivered in observation order, starting with the state at
/// subscribe time. The listener is released exactly once: by the first call
/// to [`Subscription::cancel`] or on drop, whichever comes first.
pub struct Subscription {
    journal: JournalId,
    events: mpsc::Receiver<RemoteSnapshot>,
    listener: Option<JoinHandle<()>>,

    // Holds the channel open for subscriptions that never fire
    keepalive: Option<mpsc::Sender<RemoteSnapshot>>,
}

impl Subscription {
    /// Wrap a listener task feeding `events`
    pub fn new(
        journal: JournalId,
        events: mpsc::Receiver<RemoteSnapshot>,
        listener: JoinHandle<()>,
    ) -> Self {
        Self {
            journal,
            events,
            listener: Some(listener),
            keepalive: None,
        }
    }

    /// A subscription that stays open and never delivers anything
    pub fn inert(journal: JournalId) -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            journal,
            events: rx,
            listener: None,
            keepalive: Some(tx),
        }
    }

    pub fn journal(&self) -> &JournalId {
        &self.journal
    }

    /// Wait for the next snapshot, `None` once the subscription has ended
    pub async fn next(&mut self) -> Option<RemoteSnapshot> {
        self.events.recv().await
    }

    /// Take a snapshot that has already arrived, without waiting
    pub fn try_next(&mut self) -> Option<RemoteSnapshot> {
        self.events.try_recv().ok()
    }

    /// Whether the listener is still attached
    pub fn is_active(&self) -> bool {
        self.listener.is_some() || self.keepalive.is_some()
    }

    /// Release the listener
    ///
    /// Returns `true` only for the call that actually released it.
    pub fn cancel(&mut self) -> bool {
        let released = match (self.listener.take(), self.keepalive.take()) {
            (Some(listener), _) => {
                listener.abort();
                true
            }
            (None, Some(_)) => true,
            (None, None) => false,
        };

        if released {
            self.events.close();
            debug!(journal = %self.journal, "Remote subscription released");
        }
        released
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("journal", &self.journal)
            .field("active", &self.is_active())
            .finish()
    }
}
