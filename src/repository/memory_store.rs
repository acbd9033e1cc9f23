//! In-Memory Envelope Store
//!
//! Session-scoped backing store, also the workhorse for tests. Counts
//! accepted writes so debounce behavior can be observed from outside.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DataEnvelope, DomainResult};

use super::traits::{reject_empty, EnvelopeStore};

/// Memory-backed implementation of the envelope store
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<DataEnvelope>>,
    writes: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been called
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnvelopeStore for MemoryStore {
    async fn save(&self, envelope: &DataEnvelope) -> DomainResult<()> {
        *self.inner.lock().await = Some(envelope.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self) -> DomainResult<Option<DataEnvelope>> {
        Ok(self.inner.lock().await.clone().and_then(reject_empty))
    }

    async fn sync_count(&self) -> u32 {
        self.inner
            .lock()
            .await
            .as_ref()
            .map(|e| e.sync_count)
            .unwrap_or(0)
    }
}
