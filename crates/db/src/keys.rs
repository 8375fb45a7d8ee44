//! Store key layout.
//!
//! - `<recordId>`: one placement record.
//! - `<kind>-index-<vertical>`: ordered list of record ids.
//! - `<kind>-slot-<n>`: slot cache entry (id of the occupant).
//!
//! Every key lives inside the vertical's named store, so the slot key does
//! not repeat the vertical.

use showcase_core::slot::Slot;
use showcase_core::types::RecordId;
use showcase_core::vertical::{Kind, Vertical};

pub fn record_key(id: RecordId) -> String {
    id.to_string()
}

pub fn index_key(kind: Kind, vertical: Vertical) -> String {
    format!("{kind}-index-{vertical}")
}

pub fn slot_key(kind: Kind, slot: Slot) -> String {
    format!("{kind}-slot-{slot}")
}
