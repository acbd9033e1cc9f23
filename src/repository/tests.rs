//! Repository Integration Tests
//!
//! Tests for the envelope store backends, the file backend against a
//! temp directory.

#[cfg(test)]
mod tests {
    use crate::domain::{DataEnvelope, TruckRecord};
    use crate::repository::{EnvelopeStore, FileStore, MemoryStore};

    fn sample_envelope(sync_count: u32) -> DataEnvelope {
        let record = TruckRecord::new("truck_1".to_string(), "Taco Cart".to_string(), 1);
        DataEnvelope::new(vec![record], sync_count)
    }

    fn file_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("data.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let (_dir, store) = file_store();

        store.save(&sample_envelope(3)).await.expect("save");

        let loaded = store.load().await.expect("load").expect("cached envelope");
        assert_eq!(loaded.food_trucks.len(), 1);
        assert_eq!(loaded.food_trucks[0].title, "Taco Cart");
        assert_eq!(loaded.sync_count, 3);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_none() {
        let (_dir, store) = file_store();
        assert!(store.load().await.expect("load").is_none());
        assert_eq!(store.sync_count().await, 0);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_none() {
        let (_dir, store) = file_store();
        std::fs::write(store.path(), "{not json").expect("write");
        assert!(store.load().await.expect("load").is_none());
        assert_eq!(store.sync_count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_collection_counts_as_no_cache() {
        let (_dir, store) = file_store();
        store.save(&DataEnvelope::new(Vec::new(), 5)).await.expect("save");

        // an envelope without records is not a usable cache...
        assert!(store.load().await.expect("load").is_none());
        // ...but the sync counter survives
        assert_eq!(store.sync_count().await, 5);
    }

    #[tokio::test]
    async fn test_memory_store_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.write_count(), 0);

        store.save(&sample_envelope(1)).await.expect("save");
        store.save(&sample_envelope(2)).await.expect("save");

        assert_eq!(store.write_count(), 2);
        assert_eq!(store.sync_count().await, 2);
        assert!(store.load().await.expect("load").is_some());
    }
}
