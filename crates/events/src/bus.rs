//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`PlacementEvent`]s out to any number of subscribers
//! (cache invalidators, audit sinks). It is shared via `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showcase_core::types::{RecordId, UserId};
use showcase_core::vertical::{Kind, Vertical};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub mod event_types {
    pub const CREATED: &str = "placement.created";
    pub const SLOT_ASSIGNED: &str = "placement.slot_assigned";
    pub const SLOTS_REORDERED: &str = "placement.slots_reordered";
    pub const DELETED: &str = "placement.deleted";
    pub const SLOT_CACHE_REBUILT: &str = "placement.slot_cache_rebuilt";
}

// ---------------------------------------------------------------------------
// PlacementEvent
// ---------------------------------------------------------------------------

/// A change to one vertical/kind board or one of its records.
///
/// Constructed via [`PlacementEvent::new`] and enriched with
/// [`with_record`](PlacementEvent::with_record),
/// [`with_actor`](PlacementEvent::with_actor), and
/// [`with_payload`](PlacementEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementEvent {
    /// Dot-separated event name, e.g. `"placement.slot_assigned"`.
    pub event_type: String,

    pub vertical: Vertical,

    pub kind: Kind,

    /// The record the change is about, if it concerns a single record.
    pub record_id: Option<RecordId>,

    /// The user that triggered the change, if any.
    pub actor_user_id: Option<UserId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlacementEvent {
    pub fn new(event_type: impl Into<String>, vertical: Vertical, kind: Kind) -> Self {
        Self {
            event_type: event_type.into(),
            vertical,
            kind,
            record_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_record(mut self, record_id: RecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_actor(mut self, user_id: impl Into<UserId>) -> Self {
        self.actor_user_id = Some(user_id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use showcase_core::vertical::{Kind, Vertical};
/// use showcase_events::bus::{event_types, EventBus, PlacementEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlacementEvent::new(
///     event_types::CREATED,
///     Vertical::Classifieds,
///     Kind::SeasonalPick,
/// ));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlacementEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed messages are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: PlacementEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlacementEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
