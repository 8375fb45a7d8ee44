//! Shared store handle and the per-request, cancellable session.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use showcase_core::vertical::Vertical;
use tokio_util::sync::CancellationToken;

use crate::store::{KeyValueStore, StoreError, StoreNames};

/// Cheaply cloneable handle to the backing store plus its per-vertical names.
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn KeyValueStore>,
    names: Arc<StoreNames>,
}

impl Db {
    pub fn new(store: Arc<dyn KeyValueStore>, names: StoreNames) -> Self {
        Self {
            store,
            names: Arc::new(names),
        }
    }

    pub fn names(&self) -> &StoreNames {
        &self.names
    }

    /// Open a session whose every store call is abandoned once `cancel`
    /// fires.
    pub fn session<'a>(&'a self, cancel: &'a CancellationToken) -> StoreSession<'a> {
        StoreSession {
            store: self.store.as_ref(),
            names: &self.names,
            cancel,
        }
    }
}

/// Typed, cancellable access to the store for one request.
///
/// Cancellation does not undo writes that already completed.
pub struct StoreSession<'a> {
    store: &'a dyn KeyValueStore,
    names: &'a StoreNames,
    cancel: &'a CancellationToken,
}

impl StoreSession<'_> {
    pub fn store_name(&self, vertical: Vertical) -> &str {
        self.names.for_vertical(vertical)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Read and decode the value under `key` in the vertical's store.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        vertical: Vertical,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let store = self.store_name(vertical);
        tracing::debug!(store, key, "store get");
        let raw = self.guarded(self.store.get(store, key)).await?;
        raw.map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    /// Encode `value` and write it under `key` in the vertical's store.
    pub async fn set_json<T: Serialize>(
        &self,
        vertical: Vertical,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let store = self.store_name(vertical);
        let value = serde_json::to_value(value)?;
        tracing::debug!(store, key, "store set");
        self.guarded(self.store.set(store, key, value)).await
    }

    pub async fn delete(&self, vertical: Vertical, key: &str) -> Result<(), StoreError> {
        let store = self.store_name(vertical);
        tracing::debug!(store, key, "store delete");
        self.guarded(self.store.delete(store, key)).await
    }

    /// Race a store call against the cancellation token.
    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StoreError::Cancelled),
            result = call => result,
        }
    }
}
