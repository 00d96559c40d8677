//! One-shot seed fetch from the placeholder todos endpoint
//!
//! The loader runs once as a spawned tokio task. Its result is handed to the
//! UI through a oneshot channel that the event loop polls every tick, so the
//! fetch never blocks rendering. Failures are logged and leave the list empty.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, error, info};

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::task::{Task, TaskId, TaskStatus};

/// Record shape served by the remote endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteTodo {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Outer `None` when the key is absent, `Some(None)` for an explicit null.
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Some)
}

impl RemoteTodo {
    fn status(&self) -> TaskStatus {
        match self.completed {
            Some(Some(true)) => TaskStatus::Done,
            Some(None) => TaskStatus::InProgress,
            _ => TaskStatus::ToDo,
        }
    }
}

impl From<RemoteTodo> for Task {
    fn from(remote: RemoteTodo) -> Self {
        let status = remote.status();
        Task {
            id: remote.id,
            title: remote.title,
            description: remote.description.unwrap_or_default(),
            status,
        }
    }
}

/// Decode a payload and map at most `limit` records into tasks.
///
/// Records past `limit` are never decoded, so their shape does not matter.
pub fn parse_payload(body: &[u8], limit: usize) -> Result<Vec<Task>, SeedError> {
    let mut records: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    records.truncate(limit);
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value::<RemoteTodo>(record)
                .map(Task::from)
                .map_err(SeedError::from)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct SeedLoader {
    url: String,
    limit: usize,
    timeout: Duration,
}

impl SeedLoader {
    pub fn new(url: impl Into<String>, limit: usize, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            limit,
            timeout,
        }
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(&config.url, config.limit, Duration::from_millis(config.timeout_ms))
    }

    pub async fn fetch(&self) -> Result<Vec<Task>, SeedError> {
        debug!(url = %self.url, "fetch: requesting seed data");
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(SeedError::Status(response.status()));
        }
        let body = response.bytes().await?;
        parse_payload(&body, self.limit)
    }

    /// Start the fetch on `runtime` and return the handle the UI polls.
    pub fn spawn(self, runtime: &Handle) -> SeedHandle {
        let (tx, rx) = oneshot::channel();
        runtime.spawn(async move {
            match self.fetch().await {
                Ok(tasks) => {
                    info!(count = tasks.len(), "Seed data loaded");
                    if tx.send(tasks).is_err() {
                        debug!("spawn: receiver dropped, discarding seed data");
                    }
                }
                Err(e) => error!("Error loading seed data from {}: {}", self.url, e),
            }
        });
        SeedHandle { rx: Some(rx) }
    }
}

/// Receiving side of a spawned seed fetch. Yields its tasks at most once.
#[derive(Debug)]
pub struct SeedHandle {
    rx: Option<oneshot::Receiver<Vec<Task>>>,
}

impl SeedHandle {
    /// A handle that never yields, used when seeding is turned off.
    pub fn disabled() -> Self {
        Self { rx: None }
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    pub fn poll(&mut self) -> Option<Vec<Task>> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(tasks) => {
                self.rx = None;
                Some(tasks)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                // fetch failed; the loader already logged why
                self.rx = None;
                None
            }
        }
    }
}
