//! Remote channel trait and the disabled channel

use crate::error::Result;
use crate::subscription::Subscription;
use async_trait::async_trait;
use chorus_core::{JournalId, PlaybackUpdate};
use tracing::trace;

/// Subscribe/update access to the remote document store
///
/// One logical document per journal. Publishes use merge semantics: only
/// the fields present in the update are written.
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    /// Whether this channel talks to a real store
    fn is_enabled(&self) -> bool {
        true
    }

    /// Start listening to a journal's document
    ///
    /// The first snapshot reflects the document at subscribe time and may be
    /// `None` when it does not exist.
    async fn subscribe(&self, journal: &JournalId) -> Result<Subscription>;

    /// Merge `update` into a journal's document
    async fn publish(&self, journal: &JournalId, update: &PlaybackUpdate) -> Result<()>;
}

/// Channel used when no remote store is configured
///
/// Subscriptions never fire and publishes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRemote;

#[async_trait]
impl RemoteChannel for DisabledRemote {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn subscribe(&self, journal: &JournalId) -> Result<Subscription> {
        Ok(Subscription::inert(journal.clone()))
    }

    async fn publish(&self, journal: &JournalId, _update: &PlaybackUpdate) -> Result<()> {
        trace!(journal = %journal, "Remote disabled, dropping publish");
        Ok(())
    }
}
