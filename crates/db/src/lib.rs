//! Storage layer for the placement engine.
//!
//! - [`store`]: the external [`KeyValueStore`] contract and its errors.
//! - [`memory`] / [`local`]: in-memory and directory-backed backends.
//! - [`session`]: the shared [`Db`] handle and cancellable [`StoreSession`].
//! - [`repositories`]: records, the id index, and the slot cache.

use std::path::PathBuf;
use std::sync::Arc;

pub mod keys;
pub mod local;
pub mod memory;
pub mod repositories;
pub mod session;
pub mod store;

pub use local::LocalDirStore;
pub use memory::InMemoryStore;
pub use session::{Db, StoreSession};
pub use store::{KeyValueStore, StoreError, StoreNames};

/// Open a directory-backed store rooted at `root`, creating it if needed.
pub async fn open_local(root: impl Into<PathBuf>, names: StoreNames) -> Result<Db, StoreError> {
    let store = LocalDirStore::new(root);
    tokio::fs::create_dir_all(store.root()).await?;
    Ok(Db::new(Arc::new(store), names))
}

/// Open a fresh in-memory store.
pub fn open_in_memory(names: StoreNames) -> Db {
    Db::new(Arc::new(InMemoryStore::new()), names)
}
