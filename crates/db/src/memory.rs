//! In-process [`KeyValueStore`] backed by a `HashMap`.
//!
//! Used by tests and by embedders that do not need durability. The store can
//! be switched "offline" to exercise `Unavailable` error paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{KeyValueStore, StoreError};

/// Thread-safe in-memory store; wrap in `Arc` to share.
pub struct InMemoryStore {
    entries: RwLock<HashMap<(String, String), serde_json::Value>>,
    online: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// (`false`) or succeed again (`true`).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Number of successful `set` and `delete` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of every key/value in `store`, sorted by key.
    pub async fn snapshot(&self, store: &str) -> BTreeMap<String, serde_json::Value> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|((s, _), _)| s == store)
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".into()))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, store: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        self.check_online()?;
        let entries = self.entries.read().await;
        Ok(entries.get(&(store.to_string(), key.to_string())).cloned())
    }

    async fn set(&self, store: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries
            .write()
            .await
            .insert((store.to_string(), key.to_string()), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, store: &str, key: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries
            .write()
            .await
            .remove(&(store.to_string(), key.to_string()));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
