//! Showcase placement domain.
//!
//! Pure types and rules shared by the storage layer and the placement
//! engine: verticals and kinds, slots, the generic placement record, payload
//! kinds, listing filters, and the domain error type. Nothing here does I/O.

pub mod error;
pub mod kinds;
pub mod listing;
pub mod record;
pub mod requester;
pub mod roles;
pub mod slot;
pub mod types;
pub mod vertical;
