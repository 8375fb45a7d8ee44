//! The external key-value store contract.
//!
//! The system of record is an opaque get/set/delete store addressed by
//! `(store name, key)`. It offers per-key atomicity only: no multi-key
//! transactions and no compare-and-swap.

use async_trait::async_trait;
use showcase_core::vertical::Vertical;

/// Errors raised by store backends and the session wrapper.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The caller abandoned the operation before the call completed.
    #[error("Store call cancelled")]
    Cancelled,

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    /// A stored value did not decode as the expected type.
    #[error("Malformed value under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Async key-value backend.
///
/// Values are JSON documents. Implementations must be safe to share across
/// tasks behind an `Arc`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value under `key`, or `None` if it was never written or has
    /// been deleted.
    async fn get(&self, store: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, store: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError>;

    /// Remove `key`. Deleting a missing key succeeds.
    async fn delete(&self, store: &str, key: &str) -> Result<(), StoreError>;
}

/// Store name per vertical. Each vertical lives in its own named store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreNames {
    pub classifieds: String,
    pub services: String,
}

impl StoreNames {
    pub fn for_vertical(&self, vertical: Vertical) -> &str {
        match vertical {
            Vertical::Classifieds => &self.classifieds,
            Vertical::Services => &self.services,
        }
    }
}

impl Default for StoreNames {
    fn default() -> Self {
        Self {
            classifieds: "classifieds-store".to_string(),
            services: "services-store".to_string(),
        }
    }
}
