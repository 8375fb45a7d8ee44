//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept a `&StoreSession` as the first argument.

pub mod index_repo;
pub mod record_repo;
pub mod slot_cache_repo;

pub use index_repo::IndexRepo;
pub use record_repo::RecordRepo;
pub use slot_cache_repo::SlotCacheRepo;
