//! Per-journal sync session
//!
//! A session is a single tokio task that owns the [`ReconciliationEngine`].
//! Local intents arrive over a command channel, remote snapshots over the
//! journal's [`Subscription`]. Publishes are handed to a separate publisher
//! task so the actor never waits on the network.

use crate::config::SyncConfig;
use crate::engine::ReconciliationEngine;
use crate::error::{Result, SyncError};
use crate::snapshot::SessionSnapshot;
use chorus_cache::CacheMirror;
use chorus_core::{JournalId, PlaybackUpdate, PlaylistEntry};
use chorus_playback::PlaybackControl;
use chorus_remote::{RemoteChannel, Subscription};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the session command queue
const COMMAND_BUFFER: usize = 32;

/// Commands accepted by a session actor
#[derive(Debug)]
pub enum SessionCommand {
    TogglePlay,
    SelectTrack(usize),
    NextTrack,
    PreviousTrack,
    AddEntry {
        url: String,
        title: Option<String>,
        reply: oneshot::Sender<Result<PlaylistEntry>>,
    },
    RemoveEntry(String),
    TrackEnded,
    FrameReady,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    journal: JournalId,
    commands: mpsc::Sender<SessionCommand>,
    changes: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn journal(&self) -> &JournalId {
        &self.journal
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub async fn toggle_play(&self) -> Result<()> {
        self.send(SessionCommand::TogglePlay).await
    }

    pub async fn select_track(&self, index: usize) -> Result<()> {
        self.send(SessionCommand::SelectTrack(index)).await
    }

    pub async fn next_track(&self) -> Result<()> {
        self.send(SessionCommand::NextTrack).await
    }

    pub async fn previous_track(&self) -> Result<()> {
        self.send(SessionCommand::PreviousTrack).await
    }

    pub async fn remove_entry(&self, id: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::RemoveEntry(id.into())).await
    }

    /// Report that the native backend finished the current track
    pub async fn track_ended(&self) -> Result<()> {
        self.send(SessionCommand::TrackEnded).await
    }

    /// Report that the embedded frame finished loading
    pub async fn frame_ready(&self) -> Result<()> {
        self.send(SessionCommand::FrameReady).await
    }

    /// Append an entry and return it once applied
    pub async fn add_entry(&self, url: impl Into<String>, title: Option<String>) -> Result<PlaylistEntry> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::AddEntry {
            url: url.into(),
            title,
            reply,
        })
        .await?;
        rx.await.map_err(|_| self.closed())?
    }

    /// Current state, after every previously sent command was applied
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot(reply)).await?;
        rx.await.map_err(|_| self.closed())
    }

    /// Receiver notified after every state change, local or remote
    pub fn changes(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.clone()
    }

    /// Stop the session; a no-op when it is already gone
    pub async fn shutdown(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(SessionCommand::Shutdown(reply)).await.is_err() {
            return Ok(());
        }
        let _ = rx.await;
        Ok(())
    }

    async fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| self.closed())
    }

    fn closed(&self) -> SyncError {
        SyncError::SessionClosed(self.journal.clone())
    }
}

/// Session actor state
pub struct Session {
    engine: ReconciliationEngine,
    subscription: Subscription,
    publishes: mpsc::UnboundedSender<PlaybackUpdate>,
    publisher: JoinHandle<()>,
    changes: watch::Sender<SessionSnapshot>,
    config: SyncConfig,
}

impl Session {
    /// Subscribe, seed and spawn the actor for one journal
    ///
    /// A failed subscription does not prevent the session from starting;
    /// it runs from local state and the cache.
    pub async fn start(
        journal: JournalId,
        backend: Box<dyn PlaybackControl>,
        cache: CacheMirror,
        remote: Arc<dyn RemoteChannel>,
        config: SyncConfig,
    ) -> SessionHandle {
        let mut subscription = match remote.subscribe(&journal).await {
            Ok(subscription) => subscription,
            Err(e) => {
                warn!(journal = %journal, error = %e, "Remote subscription failed, running locally");
                Subscription::inert(journal.clone())
            }
        };

        let mut engine = ReconciliationEngine::new(journal.clone(), backend, cache, config.clone());
        let buffered = match config.seed_wait() {
            Some(wait) if remote.is_enabled() => {
                match tokio::time::timeout(wait, subscription.next()).await {
                    Ok(snapshot) => snapshot,
                    Err(_) => {
                        debug!(journal = %journal, "No remote snapshot before seeding");
                        None
                    }
                }
            }
            _ => subscription.try_next(),
        };
        engine.seed(buffered.as_ref().and_then(Option::as_ref));
        if let Some(snapshot) = buffered {
            engine.apply_remote(snapshot);
        }

        let (publishes, publish_rx) = mpsc::unbounded_channel();
        let publisher = tokio::spawn(run_publisher(journal.clone(), remote, publish_rx));

        let (changes, changes_rx) = watch::channel(engine.snapshot());
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);

        let session = Session {
            engine,
            subscription,
            publishes,
            publisher,
            changes,
            config,
        };
        tokio::spawn(session.run(command_rx));

        info!(journal = %journal, "Session started");
        SessionHandle {
            journal,
            commands,
            changes: changes_rx,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        let mut remote_open = self.subscription.is_active();
        let mut shutdown_reply = None;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(SessionCommand::Shutdown(reply)) => {
                        shutdown_reply = Some(reply);
                        break;
                    }
                    Some(command) => self.handle(command),
                    None => break,
                },

                snapshot = self.subscription.next(), if remote_open => match snapshot {
                    Some(snapshot) => {
                        if self.engine.apply_remote(snapshot).changed_state() {
                            self.notify();
                        }
                    }
                    None => {
                        debug!(journal = %self.engine.journal(), "Remote subscription ended");
                        remote_open = false;
                    }
                },
            }
        }

        // Reject further commands before the slow part of shutdown
        drop(commands);
        self.teardown().await;
        if let Some(reply) = shutdown_reply {
            let _ = reply.send(());
        }
    }

    fn handle(&mut self, command: SessionCommand) {
        let update = match command {
            SessionCommand::TogglePlay => Some(self.engine.toggle_play()),
            SessionCommand::SelectTrack(index) => self.engine.select_track(index),
            SessionCommand::NextTrack => self.engine.next_track(),
            SessionCommand::PreviousTrack => self.engine.previous_track(),
            SessionCommand::TrackEnded => self.engine.track_ended(),
            SessionCommand::RemoveEntry(id) => self.engine.remove_entry(&id),
            SessionCommand::AddEntry { url, title, reply } => {
                match self.engine.add_entry(&url, title.as_deref()) {
                    Ok((entry, update)) => {
                        let _ = reply.send(Ok(entry));
                        Some(update)
                    }
                    Err(e) => {
                        let _ = reply.send(Err(e));
                        None
                    }
                }
            }
            SessionCommand::FrameReady => {
                self.engine.frame_ready();
                None
            }
            SessionCommand::Snapshot(reply) => {
                let _ = reply.send(self.engine.snapshot());
                None
            }
            SessionCommand::Shutdown(_) => None,
        };

        if let Some(update) = update {
            if self.publishes.send(update).is_err() {
                warn!(journal = %self.engine.journal(), "Publisher stopped, dropping update");
            }
            self.notify();
        }
    }

    fn notify(&self) {
        self.changes.send_replace(self.engine.snapshot());
    }

    async fn teardown(self) {
        let Session {
            engine,
            mut subscription,
            publishes,
            mut publisher,
            config,
            ..
        } = self;
        let journal = engine.journal().clone();

        subscription.cancel();
        drop(publishes);

        if tokio::time::timeout(config.drain_timeout(), &mut publisher)
            .await
            .is_err()
        {
            warn!(journal = %journal, "Pending publishes did not drain in time");
            publisher.abort();
        }

        info!(journal = %journal, "Session stopped");
    }
}

/// Send updates in order, logging failures
async fn run_publisher(
    journal: JournalId,
    remote: Arc<dyn RemoteChannel>,
    mut updates: mpsc::UnboundedReceiver<PlaybackUpdate>,
) {
    while let Some(update) = updates.recv().await {
        if let Err(e) = remote.publish(&journal, &update).await {
            warn!(journal = %journal, error = %e, "Failed to publish playback update");
        }
    }
}
