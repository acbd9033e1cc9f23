//! Repository Layer - Core Traits
//!
//! Abstract interface for envelope persistence. Implementations can use
//! a JSON file, memory, etc. One port, configurable backing store.

use async_trait::async_trait;

use crate::domain::{DataEnvelope, DomainResult};

/// Persistence port for the full data envelope
#[async_trait]
pub trait EnvelopeStore: Send + Sync {
    /// Write the envelope. Callers treat a failure as non-fatal: the
    /// in-memory collection stays authoritative for the session.
    async fn save(&self, envelope: &DataEnvelope) -> DomainResult<()>;

    /// Read the cached envelope. Returns None when the store is empty,
    /// unparsable, or holds no truck records. Never errors outward.
    async fn load(&self) -> DomainResult<Option<DataEnvelope>>;

    /// The previously persisted sync counter, 0 when absent or corrupt.
    /// Read from the raw document so an empty collection still keeps its
    /// counter.
    async fn sync_count(&self) -> u32;
}

/// Shared load rule: an envelope without records counts as no cache.
pub(super) fn reject_empty(envelope: DataEnvelope) -> Option<DataEnvelope> {
    if envelope.food_trucks.is_empty() {
        None
    } else {
        Some(envelope)
    }
}
