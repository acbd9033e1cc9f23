//! Food-Park Admin Data Core
//!
//! Layered architecture:
//! - domain: Truck entities, collection invariants and pure operations
//! - repository: Envelope persistence port and backends
//! - sync: Remote data source, GitHub contents client, load strategy,
//!   manual save coordinator
//!
//! [`AdminState`] is the single owner of the in-memory collection; every
//! mutating operation goes through it and persists to the local store,
//! so no module-level globals exist anywhere in the crate.

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod domain;
pub mod repository;
pub mod sync;

use domain::{DataEnvelope, DomainResult, EditForm, StatusFilter, TruckCollection, TruckRecord};
use repository::EnvelopeStore;
use sync::{
    GithubClient, LoadMode, LoadSource, LoadStrategy, RemoteSource, SaveOutcome, SyncManager,
};

/// Application state shared across admin operations
pub struct AdminState {
    collection: Mutex<TruckCollection>,
    store: Arc<dyn EnvelopeStore>,
    sync: SyncManager,
}

impl AdminState {
    pub fn new(store: Arc<dyn EnvelopeStore>, github: Option<GithubClient>) -> Self {
        Self {
            collection: Mutex::new(TruckCollection::new()),
            store: store.clone(),
            sync: SyncManager::new(store, github),
        }
    }

    /// Resolve the startup collection through the load strategy and adopt
    /// it. Reports which source won.
    pub async fn load(&self, remote: Arc<dyn RemoteSource>, mode: LoadMode) -> LoadSource {
        let strategy = LoadStrategy::new(remote, self.store.clone());
        let outcome = strategy.load(mode).await;
        let source = outcome.source;
        *self.collection.lock().await = outcome.collection;
        source
    }

    /// Snapshot of the current records in display order
    pub async fn records(&self) -> Vec<TruckRecord> {
        self.collection.lock().await.records().to_vec()
    }

    /// Derived admin view; leaves the collection untouched
    pub async fn visible(&self, query: &str, status: StatusFilter) -> Vec<TruckRecord> {
        self.collection
            .lock()
            .await
            .visible(query, status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Create a record with a generated id at the end of the order.
    /// Returns the new id.
    pub async fn add_truck(&self, title: String) -> String {
        let mut collection = self.collection.lock().await;
        let id = collection.add(title);
        self.persist(&collection).await;
        id
    }

    /// Delete one record, renumbering the remainder
    pub async fn delete_truck(&self, id: &str) -> bool {
        let mut collection = self.collection.lock().await;
        let removed = collection.remove(id);
        if removed {
            self.persist(&collection).await;
        }
        removed
    }

    /// Batch delete; returns how many records were removed
    pub async fn delete_trucks(&self, ids: &[String]) -> usize {
        let mut collection = self.collection.lock().await;
        let removed = collection.remove_many(ids);
        if removed > 0 {
            self.persist(&collection).await;
        }
        removed
    }

    /// Flip public visibility of a record
    pub async fn toggle_truck(&self, id: &str) -> Option<bool> {
        let mut collection = self.collection.lock().await;
        let state = collection.toggle_active(id);
        if state.is_some() {
            self.persist(&collection).await;
        }
        state
    }

    /// Drag-and-drop reorder; persists locally, implies no remote push
    pub async fn reorder(&self, source: usize, target: usize) -> bool {
        let mut collection = self.collection.lock().await;
        let changed = collection.reorder(source, target);
        if changed {
            self.persist(&collection).await;
        }
        changed
    }

    /// Put a record into Editing state. Persisted so a reload mid-edit
    /// does not lose the flag.
    pub async fn start_edit(&self, id: &str) -> bool {
        let mut collection = self.collection.lock().await;
        let started = domain::start_edit(&mut collection, id);
        if started {
            self.persist(&collection).await;
        }
        started
    }

    /// Commit staged values; `Ok(false)` means validation rejected the
    /// form and the record stays in Editing state
    pub async fn save_edit(&self, id: &str, form: &EditForm) -> DomainResult<bool> {
        let mut collection = self.collection.lock().await;
        let saved = domain::save_edit(&mut collection, id, form)?;
        if saved {
            self.persist(&collection).await;
        }
        Ok(saved)
    }

    /// Discard staged values and leave Editing state
    pub async fn cancel_edit(&self, id: &str) -> bool {
        let mut collection = self.collection.lock().await;
        let cancelled = domain::cancel_edit(&mut collection, id);
        if cancelled {
            self.persist(&collection).await;
        }
        cancelled
    }

    /// Debounced save-and-push; see [`SyncManager::manual_save`]
    pub async fn manual_save(&self) -> SaveOutcome {
        let records = self.records().await;
        self.sync.manual_save(&records).await
    }

    pub fn is_remote_configured(&self) -> bool {
        self.sync.is_remote_configured()
    }

    /// Local save after a mutation. Keeps the previous sync counter: it
    /// counts manual pushes, not edits. A storage failure is logged and
    /// swallowed; memory stays authoritative.
    async fn persist(&self, collection: &TruckCollection) {
        let envelope =
            DataEnvelope::new(collection.records().to_vec(), self.store.sync_count().await);
        if let Err(e) = self.store.save(&envelope).await {
            log::warn!("local persist failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::LinkSlot;
    use repository::MemoryStore;
    use sync::SaveStatus;

    fn state_with_memory_store() -> (Arc<MemoryStore>, AdminState) {
        let store = Arc::new(MemoryStore::new());
        let state = AdminState::new(store.clone(), None);
        (store, state)
    }

    #[tokio::test]
    async fn test_mutations_persist_locally() {
        let (store, state) = state_with_memory_store();

        let id = state.add_truck("Taco Cart".to_string()).await;
        state.add_truck("Noodle Bar".to_string()).await;
        assert!(state.reorder(1, 0).await);
        assert!(state.delete_truck(&id).await);

        let cached = store.load().await.unwrap().expect("persisted envelope");
        assert_eq!(cached.food_trucks.len(), 1);
        assert_eq!(cached.food_trucks[0].title, "Noodle Bar");
        assert_eq!(cached.food_trucks[0].priority, 1);
        // plain mutations never touch the push counter
        assert_eq!(cached.sync_count, 0);
    }

    #[tokio::test]
    async fn test_edit_flow_through_facade() {
        let (store, state) = state_with_memory_store();
        let id = state.add_truck("Dumplings".to_string()).await;

        assert!(state.start_edit(&id).await);
        let mid_edit = store.load().await.unwrap().expect("persisted mid-edit");
        assert!(mid_edit.food_trucks[0].is_editing, "edit flag survives reload");

        let form = EditForm {
            title: "Dumpling House".to_string(),
            links: vec![LinkSlot {
                text: "menu".to_string(),
                url: "https://example.com/menu".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(state.save_edit(&id, &form).await, Ok(true));

        let records = state.records().await;
        assert_eq!(records[0].title, "Dumpling House");
        assert_eq!(records[0].alt, "Dumpling House");
        assert_eq!(records[0].link.len(), 1);
        assert!(!records[0].is_editing);
    }

    #[tokio::test]
    async fn test_manual_save_without_remote_is_local_only() {
        let (store, state) = state_with_memory_store();
        state.add_truck("Taco Cart".to_string()).await;

        assert!(!state.is_remote_configured());
        let outcome = state.manual_save().await;
        assert!(matches!(outcome.status, SaveStatus::LocalOnly));
        assert_eq!(outcome.sync_count, 1);
        assert_eq!(store.sync_count().await, 1);
    }

    #[tokio::test]
    async fn test_cancel_edit_keeps_original_values() {
        let (_store, state) = state_with_memory_store();
        let id = state.add_truck("Crepes".to_string()).await;

        state.start_edit(&id).await;
        assert!(state.cancel_edit(&id).await);

        let records = state.records().await;
        assert_eq!(records[0].title, "Crepes");
        assert!(!records[0].is_editing);
    }
}
