//! Thread-safe brevet repository.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{Brevet, BrevetId};

use super::error::StoreError;
use super::snapshot::{Contents, Snapshot, StoredBrevet};

/// Brevet repository shared between request handlers.
///
/// Clones share the same data. With a snapshot path, every change is
/// written to disk before it becomes visible.
#[derive(Clone)]
pub struct BrevetStore {
    inner: Arc<RwLock<Contents>>,
    snapshot: Option<Snapshot>,
}

impl Default for BrevetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BrevetStore {
    /// An empty store that lives only in memory.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Contents::default())),
            snapshot: None,
        }
    }

    /// A store backed by a snapshot file, loading it if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let snapshot = Snapshot::new(path);
        let contents = snapshot.load()?;
        info!(
            path = %snapshot.path().display(),
            brevets = contents.brevets.len(),
            "loaded brevet snapshot"
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(contents)),
            snapshot: Some(snapshot),
        })
    }

    /// All brevets, oldest first.
    pub async fn list(&self) -> Vec<StoredBrevet> {
        let guard = self.inner.read().await;
        guard
            .brevets
            .iter()
            .map(|(id, brevet)| StoredBrevet {
                id: *id,
                brevet: brevet.clone(),
            })
            .collect()
    }

    pub async fn get(&self, id: BrevetId) -> Result<Brevet, StoreError> {
        let guard = self.inner.read().await;
        guard
            .brevets
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// The most recently inserted brevet.
    pub async fn latest(&self) -> Option<StoredBrevet> {
        let guard = self.inner.read().await;
        guard
            .brevets
            .last_key_value()
            .map(|(id, brevet)| StoredBrevet {
                id: *id,
                brevet: brevet.clone(),
            })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.brevets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.brevets.is_empty()
    }

    /// Store a new brevet and return its id.
    pub async fn insert(&self, brevet: Brevet) -> Result<BrevetId, StoreError> {
        let id = self
            .mutate(|contents| {
                let id = contents.next_id;
                contents.next_id = id.next();
                contents.brevets.insert(id, brevet);
                Ok(id)
            })
            .await?;
        debug!(%id, "inserted brevet");
        Ok(id)
    }

    /// Replace the brevet stored under `id`.
    pub async fn update(&self, id: BrevetId, brevet: Brevet) -> Result<(), StoreError> {
        self.mutate(|contents| match contents.brevets.get_mut(&id) {
            Some(slot) => {
                *slot = brevet;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        })
        .await?;
        debug!(%id, "updated brevet");
        Ok(())
    }

    pub async fn delete(&self, id: BrevetId) -> Result<(), StoreError> {
        self.mutate(|contents| {
            contents
                .brevets
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound(id))
        })
        .await?;
        debug!(%id, "deleted brevet");
        Ok(())
    }

    /// Apply `change` to a copy of the contents, persist it, then publish it.
    ///
    /// On any failure the visible contents stay as they were.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Contents) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = change(&mut next)?;

        if let Some(snapshot) = &self.snapshot {
            snapshot.save(&next)?;
        }

        *guard = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Checkpoint;
    use tempfile::tempdir;

    fn brevet(length: f64) -> Brevet {
        Brevet {
            length,
            start_time: "2021-01-01T00:00".into(),
            checkpoints: vec![Checkpoint {
                km: 150.0,
                open: "2021-01-01T04:25".into(),
                close: "2021-01-01T10:00".into(),
                location: None,
            }],
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = BrevetStore::new();
        let a = store.insert(brevet(200.0)).await.unwrap();
        let b = store.insert(brevet(300.0)).await.unwrap();

        assert_eq!(a, BrevetId::new(1));
        assert_eq!(b, BrevetId::new(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_oldest_first() {
        let store = BrevetStore::new();
        store.insert(brevet(200.0)).await.unwrap();
        store.insert(brevet(400.0)).await.unwrap();

        let lengths: Vec<f64> = store.list().await.iter().map(|s| s.brevet.length).collect();
        assert_eq!(lengths, vec![200.0, 400.0]);
    }

    #[tokio::test]
    async fn latest_is_newest_insert() {
        let store = BrevetStore::new();
        assert!(store.latest().await.is_none());

        store.insert(brevet(200.0)).await.unwrap();
        let id = store.insert(brevet(600.0)).await.unwrap();

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.id, id);
        assert_eq!(latest.brevet.length, 600.0);
    }

    #[tokio::test]
    async fn update_replaces() {
        let store = BrevetStore::new();
        let id = store.insert(brevet(200.0)).await.unwrap();

        store.update(id, brevet(1000.0)).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().length, 1000.0);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = BrevetStore::new();
        let id = BrevetId::new(9);

        assert!(matches!(store.get(id).await, Err(StoreError::NotFound(i)) if i == id));
        assert!(matches!(
            store.update(id, brevet(200.0)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_but_ids_are_not_reused() {
        let store = BrevetStore::new();
        let first = store.insert(brevet(200.0)).await.unwrap();
        store.delete(first).await.unwrap();
        assert!(store.is_empty().await);

        let second = store.insert(brevet(200.0)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = BrevetStore::new();
        let other = store.clone();
        store.insert(brevet(200.0)).await.unwrap();
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("brevets.json");

        let store = BrevetStore::open(&path).unwrap();
        let kept = store.insert(brevet(200.0)).await.unwrap();
        let dropped = store.insert(brevet(300.0)).await.unwrap();
        store.delete(dropped).await.unwrap();
        drop(store);

        let reopened = BrevetStore::open(&path).unwrap();
        assert_eq!(reopened.len().await, 1);
        assert_eq!(reopened.get(kept).await.unwrap(), brevet(200.0));

        let next = reopened.insert(brevet(400.0)).await.unwrap();
        assert_eq!(next, BrevetId::new(3));
    }

    #[tokio::test]
    async fn insert_after_stale_snapshot_keeps_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("brevets.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "next_id": 1,
                "brevets": [{"id": 1, "length": 200.0, "start_time": "2021-01-01T00:00", "checkpoints": []}]
            })
            .to_string(),
        )
        .unwrap();

        let store = BrevetStore::open(&path).unwrap();
        let id = store.insert(brevet(300.0)).await.unwrap();

        assert_eq!(id, BrevetId::new(2));
        assert_eq!(store.get(BrevetId::new(1)).await.unwrap().length, 200.0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn failed_write_leaves_contents_unchanged() {
        let dir = tempdir().unwrap();
        // A directory where the snapshot file should be makes every write fail.
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        let store = BrevetStore {
            inner: Arc::new(RwLock::new(Contents::default())),
            snapshot: Some(Snapshot::new(&path)),
        };

        assert!(store.insert(brevet(200.0)).await.is_err());
        assert!(store.is_empty().await);
    }
}
