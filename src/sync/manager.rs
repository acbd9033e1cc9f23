//! Sync Manager
//!
//! Debounces manual save triggers, persists locally, and pushes to the
//! remote store when a token is configured. Local persistence and remote
//! sync are deliberately decoupled: a remote failure never rolls back or
//! blocks the local save.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::{DataEnvelope, TruckRecord};
use crate::repository::EnvelopeStore;

use super::github::{GithubClient, SyncReceipt};

/// Calls starting less than this after the previously accepted call are
/// dropped entirely. Coarse guard against two overlapping sync attempts
/// racing each other on the remote sha.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// How a manual save resolved
#[derive(Debug)]
pub enum SaveStatus {
    /// Dropped by the debounce window; nothing was written
    Debounced,
    /// Saved locally; no remote configured
    LocalOnly,
    /// Saved locally and pushed; carries the created commit
    Synced(SyncReceipt),
    /// Saved locally, remote push failed
    SyncFailed(String),
}

/// Outcome of a manual save
#[derive(Debug)]
pub struct SaveOutcome {
    pub status: SaveStatus,
    pub sync_count: u32,
}

/// Debounced save-and-push coordinator
pub struct SyncManager {
    store: Arc<dyn EnvelopeStore>,
    github: Option<GithubClient>,
    last_accepted: Mutex<Option<Instant>>,
    debounce: Duration,
}

impl SyncManager {
    pub fn new(store: Arc<dyn EnvelopeStore>, github: Option<GithubClient>) -> Self {
        Self::with_debounce(store, github, DEBOUNCE_WINDOW)
    }

    /// Custom debounce window (tests)
    pub fn with_debounce(
        store: Arc<dyn EnvelopeStore>,
        github: Option<GithubClient>,
        debounce: Duration,
    ) -> Self {
        Self {
            store,
            github,
            last_accepted: Mutex::new(None),
            debounce,
        }
    }

    pub fn is_remote_configured(&self) -> bool {
        self.github
            .as_ref()
            .map(|c| c.config().is_configured())
            .unwrap_or(false)
    }

    /// Persist the given records and, if configured, push them remotely.
    ///
    /// The sync counter increments once per accepted call, before the
    /// push; it counts manual saves, not mutations, and a failed push
    /// does not roll it back.
    pub async fn manual_save(&self, records: &[TruckRecord]) -> SaveOutcome {
        {
            let mut last = self.last_accepted.lock().await;
            let now = Instant::now();
            if let Some(previous) = *last {
                if now.duration_since(previous) < self.debounce {
                    log::info!("manual save dropped by debounce");
                    return SaveOutcome {
                        status: SaveStatus::Debounced,
                        sync_count: self.store.sync_count().await,
                    };
                }
            }
            *last = Some(now);
        }

        let sync_count = self.store.sync_count().await + 1;
        let envelope = DataEnvelope::new(records.to_vec(), sync_count);

        if let Err(e) = self.store.save(&envelope).await {
            // In-memory state stays authoritative for the session.
            log::warn!("local save failed: {}", e);
        }

        let github = match &self.github {
            Some(client) if client.config().is_configured() => client,
            _ => {
                return SaveOutcome {
                    status: SaveStatus::LocalOnly,
                    sync_count,
                };
            }
        };

        // Remote pushes never carry transient edit-mode flags.
        match github.sync_data(&envelope.sanitized()).await {
            Ok(receipt) => {
                log::info!("synced as {}", receipt.commit_sha);
                SaveOutcome {
                    status: SaveStatus::Synced(receipt),
                    sync_count,
                }
            }
            Err(e) => {
                log::error!("remote sync failed: {}", e);
                SaveOutcome {
                    status: SaveStatus::SyncFailed(e.to_string()),
                    sync_count,
                }
            }
        }
    }
}
