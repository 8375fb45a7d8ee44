//! Listing filters and slot-invariant checks over loaded records.
//!
//! The store has no query language, so listings load every indexed record
//! and filter in memory with these helpers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::PlacementRecord;
use crate::slot::{Slot, SLOT_COUNT};
use crate::types::{Date, RecordId};

/// Active and inside its validity window on `today`.
pub fn is_listable<P>(record: &PlacementRecord<P>, today: Date) -> bool {
    record.is_active() && record.is_live_on(today)
}

/// Listable records that hold no valid slot, newest `updated_at` first.
///
/// Ties fall back to `created_at` descending so the order is stable.
pub fn select_active<P>(records: Vec<PlacementRecord<P>>, today: Date) -> Vec<PlacementRecord<P>> {
    let mut active: Vec<_> = records
        .into_iter()
        .filter(|r| is_listable(r, today) && r.slot().is_none())
        .collect();
    active.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    active
}

/// Listable records holding a valid slot, ascending by slot.
pub fn select_slotted<P>(records: Vec<PlacementRecord<P>>, today: Date) -> Vec<PlacementRecord<P>> {
    let mut slotted: Vec<_> = records
        .into_iter()
        .filter(|r| is_listable(r, today) && r.slot().is_some())
        .collect();
    slotted.sort_by_key(|r| r.slot());
    slotted
}

/* --------------------------------------------------------------------------
   Invariant checks
   -------------------------------------------------------------------------- */

/// A slot held by more than one active record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotViolation {
    pub slot: Slot,
    pub record_ids: Vec<RecordId>,
}

/// Find slots held by more than one active record.
///
/// Expiry is ignored: an expired but active record still blocks its slot
/// until evicted.
pub fn detect_slot_violations<P>(records: &[PlacementRecord<P>]) -> Vec<SlotViolation> {
    let mut holders: BTreeMap<Slot, Vec<RecordId>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_active()) {
        if let Some(slot) = record.slot() {
            holders.entry(slot).or_default().push(record.id);
        }
    }
    holders
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(slot, record_ids)| SlotViolation { slot, record_ids })
        .collect()
}

/// `true` when a slotted listing could only have come from broken data.
pub fn exceeds_board<P>(slotted: &[PlacementRecord<P>]) -> bool {
    slotted.len() > SLOT_COUNT
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
