//! Record stores: keyed, append-only collections shared across handlers.
//!
//! `AppState` holds `Arc<dyn RecordStore<T>>`, so the in-memory backend can be
//! swapped for a database without touching handler code.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A record plus the metadata the store assigned to it.
#[derive(Debug, Clone)]
pub struct Stored<T> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub record: T,
}

/// Get/put/list over records keyed by a generated UUID.
/// Records are immutable once inserted; there is no update or delete.
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Stores `record` under a freshly generated key and returns the key.
    async fn insert(&self, record: T) -> Uuid;

    async fn get(&self, id: Uuid) -> Option<T>;

    /// All records, oldest first.
    async fn list(&self) -> Vec<Stored<T>>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-memory store. Contents are lost on exit.
pub struct InMemoryStore<T> {
    records: RwLock<HashMap<Uuid, Stored<T>>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn insert(&self, record: T) -> Uuid {
        let mut records = self.records.write().await;
        // v4 collisions are practically impossible, but the key must be unique.
        let mut id = Uuid::new_v4();
        while records.contains_key(&id) {
            id = Uuid::new_v4();
        }
        records.insert(
            id,
            Stored {
                id,
                created_at: Utc::now(),
                record,
            },
        );
        id
    }

    async fn get(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .get(&id)
            .map(|stored| stored.record.clone())
    }

    async fn list(&self) -> Vec<Stored<T>> {
        let mut all: Vec<Stored<T>> = self.records.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_then_get_returns_record() {
        let store: InMemoryStore<String> = InMemoryStore::new();
        let id = store.insert("alpha".to_string()).await;
        assert_eq!(store.get(id).await.as_deref(), Some("alpha"));
    }

    #[tokio::test]
    async fn test_get_unknown_key_is_none() {
        let store: InMemoryStore<String> = InMemoryStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_keys_are_unique() {
        let store: InMemoryStore<i32> = InMemoryStore::new();
        let mut ids = HashSet::new();
        for i in 0..100 {
            ids.insert(store.insert(i).await);
        }
        assert_eq!(ids.len(), 100);
        assert_eq!(store.len().await, 100);
    }

    #[tokio::test]
    async fn test_list_returns_every_record_with_its_key() {
        let store: InMemoryStore<&'static str> = InMemoryStore::new();
        let a = store.insert("a").await;
        let b = store.insert("b").await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        let pairs: HashSet<(Uuid, &str)> = listed.iter().map(|s| (s.id, s.record)).collect();
        assert!(pairs.contains(&(a, "a")));
        assert!(pairs.contains(&(b, "b")));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_kept() {
        let store: Arc<InMemoryStore<usize>> = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(i).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
    }
}
