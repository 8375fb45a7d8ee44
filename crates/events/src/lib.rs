//! Placement change notifications.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlacementEvent`]: the envelope every slot or lifecycle change emits.
//! - [`event_types`]: the dot-separated event names.

pub mod bus;

pub use bus::{event_types, EventBus, PlacementEvent};
