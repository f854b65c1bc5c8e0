//! HTTP document store client
//!
//! Talks to a REST document service exposing one JSON document per
//! journal at `{base}/journals/{journal}/music`:
//! - `GET` returns the document (`404` when it does not exist)
//! - `PATCH` merges the request body into it

use crate::channel::RemoteChannel;
use crate::error::{RemoteError, Result};
use crate::subscription::{RemoteSnapshot, Subscription, EVENT_BUFFER};
use async_trait::async_trait;
use chorus_core::{JournalId, PlaybackUpdate, RemoteDocument};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use url::Url;

/// Configuration for connecting to a document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the store (e.g., "https://sync.example.com/api")
    pub url: String,

    /// How often a subscription polls for changes (default: 1000 ms)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Request timeout (default: 10 s)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

impl RemoteConfig {
    /// Create a config with default timings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Document store client.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    http: Client,
    base_url: Url,
    poll_interval: Duration,
}

impl HttpDocumentStore {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(RemoteError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RemoteError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = Url::parse(url).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(format!("{url} cannot be a base URL")));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("Chorus/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            poll_interval: config.poll_interval(),
        })
    }

    /// Base URL of the store.
    pub fn url(&self) -> &str {
        self.base_url.as_str()
    }

    /// URL of a journal's document.
    pub fn document_url(&self, journal: &JournalId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("journals")
                .push(journal.as_str())
                .push("music");
        }
        url
    }

    /// Read a journal's document once.
    pub async fn fetch(&self, journal: &JournalId) -> Result<RemoteSnapshot> {
        fetch_document(&self.http, self.document_url(journal)).await
    }
}

async fn fetch_document(http: &Client, url: Url) -> Result<RemoteSnapshot> {
    let response = http.get(url).send().await.map_err(map_send_error)?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status.is_success() {
        let document: RemoteDocument = response.json().await.map_err(|e| {
            RemoteError::ParseError(format!("Failed to parse document: {}", e))
        })?;
        Ok(Some(document))
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

fn map_send_error(e: reqwest::Error) -> RemoteError {
    if e.is_connect() || e.is_timeout() {
        RemoteError::ServerUnreachable(e.to_string())
    } else {
        RemoteError::Request(e)
    }
}

#[async_trait]
impl RemoteChannel for HttpDocumentStore {
    async fn subscribe(&self, journal: &JournalId) -> Result<Subscription> {
        let http = self.http.clone();
        let url = self.document_url(journal);
        let period = self.poll_interval;
        let watched = journal.clone();
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let listener = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<RemoteSnapshot> = None;

            loop {
                ticker.tick().await;

                match fetch_document(&http, url.clone()).await {
                    Ok(snapshot) => {
                        if last.as_ref() == Some(&snapshot) {
                            continue;
                        }
                        last = Some(snapshot.clone());
                        if tx.send(snapshot).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(journal = %watched, error = %e, "Document poll failed");
                    }
                }
            }
        });

        info!(journal = %journal, url = %self.document_url(journal), "Subscribed to remote document");
        Ok(Subscription::new(journal.clone(), rx, listener))
    }

    async fn publish(&self, journal: &JournalId, update: &PlaybackUpdate) -> Result<()> {
        let url = self.document_url(journal);
        debug!(journal = %journal, url = %url, "Publishing playback update");

        let response = self
            .http
            .patch(url)
            .json(update)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(RemoteError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
