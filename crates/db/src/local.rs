//! [`KeyValueStore`] backed by a local directory: one JSON file per key.
//!
//! Layout: `<root>/<store>/<key>.json`. Writes go to a temporary sibling and
//! are renamed into place, so a reader never sees a half-written value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::store::{KeyValueStore, StoreError};

/// Directory-backed store for single-host deployments and maintenance runs.
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, store: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_segment(store)?;
        validate_segment(key)?;
        Ok(self.root.join(store).join(format!("{key}.json")))
    }
}

/// Store names and keys become path segments; only `[A-Za-z0-9_-]` is allowed.
fn validate_segment(segment: &str) -> Result<(), StoreError> {
    let valid = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(segment.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for LocalDirStore {
    async fn get(&self, store: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let path = self.path_for(store, key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|source| {
                    StoreError::Malformed {
                        key: key.to_string(),
                        source,
                    }
                })?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, store: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let path = self.path_for(store, key)?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = path.with_extension(format!("json.tmp-{}", uuid::Uuid::new_v4()));
        let bytes = serde_json::to_vec(&value)?;
        tokio::fs::write(&tmp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, store: &str, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(store, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
