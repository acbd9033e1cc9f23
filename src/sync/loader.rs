//! Load Strategy
//!
//! Decides, at startup, which copy of the data to trust. The deployed
//! behavior prefers remote-as-truth over the local cache so stale browser
//! state never masks a published update; the forced mode skips the cache
//! entirely because the caller's intent is "discard whatever is cached".

use std::sync::Arc;

use crate::domain::{DataEnvelope, TruckCollection};
use crate::repository::EnvelopeStore;

use super::remote_source::RemoteSource;

/// Entry mode for a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Remote first, local cache second, empty last
    Smart,
    /// Remote or empty; the local cache is bypassed
    ForceRemote,
}

/// Which source ended up satisfying the load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    LocalCache,
    Empty,
}

/// Result of a load; never an error
#[derive(Debug)]
pub struct LoadOutcome {
    pub collection: TruckCollection,
    pub source: LoadSource,
    /// Sync counter carried over from the winning envelope
    pub sync_count: u32,
}

/// Startup load decision logic
pub struct LoadStrategy {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn EnvelopeStore>,
}

impl LoadStrategy {
    pub fn new(remote: Arc<dyn RemoteSource>, store: Arc<dyn EnvelopeStore>) -> Self {
        Self { remote, store }
    }

    /// Resolve a collection according to the mode. Every failure degrades
    /// to the next source; the final fallback is an explicit empty
    /// collection, never fabricated sample data.
    pub async fn load(&self, mode: LoadMode) -> LoadOutcome {
        match self.remote.fetch().await {
            Ok(envelope) => {
                log::info!("loaded {} trucks from remote", envelope.food_trucks.len());
                self.refresh_cache(&envelope).await;
                return outcome(envelope, LoadSource::Remote);
            }
            Err(e) => log::warn!("remote load failed: {}", e),
        }

        if mode == LoadMode::Smart {
            match self.store.load().await {
                Ok(Some(envelope)) => {
                    log::info!("loaded {} trucks from local cache", envelope.food_trucks.len());
                    return outcome(envelope, LoadSource::LocalCache);
                }
                Ok(None) => log::info!("no usable local cache"),
                Err(e) => log::warn!("local cache load failed: {}", e),
            }
        }

        log::info!("falling back to empty collection");
        LoadOutcome {
            collection: TruckCollection::new(),
            source: LoadSource::Empty,
            sync_count: self.store.sync_count().await,
        }
    }

    async fn refresh_cache(&self, envelope: &DataEnvelope) {
        if let Err(e) = self.store.save(envelope).await {
            log::warn!("cache refresh failed: {}", e);
        }
    }
}

fn outcome(envelope: DataEnvelope, source: LoadSource) -> LoadOutcome {
    LoadOutcome {
        sync_count: envelope.sync_count,
        collection: TruckCollection::from_records(envelope.food_trucks),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, DomainResult, TruckRecord};
    use crate::repository::MemoryStore;
    use async_trait::async_trait;

    struct StubRemote {
        envelope: Option<DataEnvelope>,
    }

    #[async_trait]
    impl RemoteSource for StubRemote {
        async fn fetch(&self) -> DomainResult<DataEnvelope> {
            self.envelope
                .clone()
                .ok_or_else(|| DomainError::Internal("connection refused".to_string()))
        }
    }

    fn remote_with(titles: &[&str]) -> Arc<StubRemote> {
        let records = titles
            .iter()
            .enumerate()
            .map(|(i, t)| TruckRecord::new(format!("truck_{}", i), t.to_string(), i as u32 + 1))
            .collect();
        Arc::new(StubRemote {
            envelope: Some(DataEnvelope::new(records, 7)),
        })
    }

    fn failing_remote() -> Arc<StubRemote> {
        Arc::new(StubRemote { envelope: None })
    }

    #[tokio::test]
    async fn test_remote_wins_and_refreshes_cache() {
        let store = Arc::new(MemoryStore::new());
        let strategy = LoadStrategy::new(remote_with(&["A", "B"]), store.clone());

        let outcome = strategy.load(LoadMode::Smart).await;
        assert_eq!(outcome.source, LoadSource::Remote);
        assert_eq!(outcome.collection.len(), 2);
        assert_eq!(outcome.sync_count, 7);

        // remote envelope was written back as a cache refresh
        let cached = store.load().await.unwrap().expect("cache refreshed");
        assert_eq!(cached.food_trucks.len(), 2);
    }

    #[tokio::test]
    async fn test_smart_falls_back_to_local_cache() {
        let store = Arc::new(MemoryStore::new());
        let record = TruckRecord::new("truck_9".to_string(), "Cached".to_string(), 1);
        store.save(&DataEnvelope::new(vec![record], 2)).await.unwrap();

        let strategy = LoadStrategy::new(failing_remote(), store);
        let outcome = strategy.load(LoadMode::Smart).await;
        assert_eq!(outcome.source, LoadSource::LocalCache);
        assert_eq!(outcome.collection.records()[0].title, "Cached");
        assert_eq!(outcome.sync_count, 2);
    }

    #[tokio::test]
    async fn test_smart_falls_back_to_empty_without_error() {
        let strategy = LoadStrategy::new(failing_remote(), Arc::new(MemoryStore::new()));
        let outcome = strategy.load(LoadMode::Smart).await;
        assert_eq!(outcome.source, LoadSource::Empty);
        assert!(outcome.collection.is_empty());
    }

    #[tokio::test]
    async fn test_force_remote_bypasses_populated_cache() {
        let store = Arc::new(MemoryStore::new());
        let record = TruckRecord::new("truck_9".to_string(), "Cached".to_string(), 1);
        store.save(&DataEnvelope::new(vec![record], 2)).await.unwrap();

        let strategy = LoadStrategy::new(failing_remote(), store);
        let outcome = strategy.load(LoadMode::ForceRemote).await;
        assert_eq!(outcome.source, LoadSource::Empty);
        assert!(outcome.collection.is_empty());
    }
}
