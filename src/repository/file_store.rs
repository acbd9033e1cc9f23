//! File-Backed Envelope Store
//!
//! Persists the envelope as pretty-printed JSON next to the app data,
//! written via a temp file + rename so a crash mid-write never leaves a
//! truncated document behind.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DataEnvelope, DomainError, DomainResult};

use super::traits::{reject_empty, EnvelopeStore};

/// JSON-file implementation of the envelope store
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Parse whatever is on disk, tolerating absence and corruption.
    fn read_raw(&self) -> Option<DataEnvelope> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("failed to read {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                log::warn!("unparsable envelope at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl EnvelopeStore for FileStore {
    async fn save(&self, envelope: &DataEnvelope) -> DomainResult<()> {
        let data = serde_json::to_vec_pretty(envelope)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &data).map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }

    async fn load(&self) -> DomainResult<Option<DataEnvelope>> {
        Ok(self.read_raw().and_then(reject_empty))
    }

    async fn sync_count(&self) -> u32 {
        self.read_raw().map(|e| e.sync_count).unwrap_or(0)
    }
}
