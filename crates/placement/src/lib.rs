//! Slotted placement engine.
//!
//! Places seasonal picks, featured stores and featured categories into the
//! six numbered slots of each vertical, on top of a plain key-value store.
//!
//! - [`SlotAssigner`]: single-slot assignment, full-board reorder, and the
//!   active / slotted listings.
//! - [`LifecycleManager`]: create, get, and soft delete.
//! - [`Maintenance`]: index audits and slot cache rebuilds.
//!
//! All three share a [`PlacementState`]. Mutations on one (vertical, kind)
//! board are serialized through [`guard::WriteGuards`].

pub mod assigner;
pub mod config;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod maintenance;
pub mod queries;
pub mod state;

pub use assigner::SlotAssigner;
pub use config::PlacementConfig;
pub use error::{PlacementError, PlacementResult};
pub use lifecycle::LifecycleManager;
pub use maintenance::{IndexAudit, Maintenance, MaintenanceReport, SlotCacheRebuild};
pub use state::{PlacementState, RequestContext};
