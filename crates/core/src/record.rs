//! The generic placement record and its lifecycle.
//!
//! `PlacementRecord<P>` is the unit the store persists under its id. Status
//! and slot are private so that the only ways to change them are the
//! transitions below; in particular nothing moves a record out of
//! [`RecordStatus::Deleted`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::kinds::PlacementKind;
use crate::slot::Slot;
use crate::types::{Date, RecordId, Timestamp, UserId};
use crate::vertical::{Kind, Vertical};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Soft-delete state. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Deleted,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a placement record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlacement<P> {
    pub fields: P,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Place the record straight into this slot after creation.
    pub initial_slot: Option<i32>,
}

impl<P> NewPlacement<P> {
    /// An unslotted placement with no validity window.
    pub fn new(fields: P) -> Self {
        Self {
            fields,
            start_date: None,
            end_date: None,
            initial_slot: None,
        }
    }
}

impl<P: PlacementKind> NewPlacement<P> {
    /// Validate the payload, the validity window and the requested slot.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.fields.validate()?;
        validate_window(self.start_date, self.end_date)?;
        if let Some(slot) = self.initial_slot {
            Slot::new(slot)?;
        }
        Ok(())
    }
}

/// `end_date` may not precede `start_date`.
pub fn validate_window(start: Option<Date>, end: Option<Date>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(CoreError::Validation(format!(
            "End date {end} is before start date {start}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A stored placement candidate of payload kind `P`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord<P> {
    pub id: RecordId,
    pub vertical: Vertical,
    pub owner_id: UserId,
    pub fields: P,
    /// Raw stored slot. Legacy writers used `0` for "unslotted".
    #[serde(default)]
    slot_order: Option<i32>,
    status: RecordStatus,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<P: PlacementKind> PlacementRecord<P> {
    /// Build a fresh, active, unslotted record. `input.initial_slot` is
    /// ignored here; placing into a slot goes through the slot engine.
    pub fn create(
        id: RecordId,
        vertical: Vertical,
        owner_id: UserId,
        input: NewPlacement<P>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            vertical,
            owner_id,
            fields: input.fields,
            slot_order: None,
            status: RecordStatus::Active,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> Kind {
        P::KIND
    }
}

impl<P> PlacementRecord<P> {
    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// The slot this record occupies, if any. Out-of-range stored values
    /// read as `None`.
    pub fn slot(&self) -> Option<Slot> {
        Slot::from_stored(self.slot_order)
    }

    /// The stored value, unnormalized.
    pub fn raw_slot_order(&self) -> Option<i32> {
        self.slot_order
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// `true` when the validity window covers `today`.
    pub fn is_live_on(&self, today: Date) -> bool {
        let started = self.start_date.is_none_or(|start| start <= today);
        let not_ended = self.end_date.is_none_or(|end| end >= today);
        started && not_ended
    }

    /// Put the record into `slot`. Deleted records cannot be slotted.
    pub fn assign_slot(&mut self, slot: Slot, now: Timestamp) -> Result<(), CoreError> {
        if !self.is_active() {
            return Err(CoreError::Conflict(format!(
                "Record {} is deleted and cannot be placed in a slot",
                self.id
            )));
        }
        self.slot_order = Some(slot.get());
        self.updated_at = now;
        Ok(())
    }

    /// Remove the record from its slot. Returns `true` if anything changed.
    ///
    /// A legacy `0` or corrupt value is normalized to `None` as well.
    pub fn clear_slot(&mut self, now: Timestamp) -> bool {
        if self.slot_order.is_none() {
            return false;
        }
        self.slot_order = None;
        self.updated_at = now;
        true
    }

    /// Soft-delete the record. Returns `false` if it was already deleted,
    /// in which case nothing is touched.
    pub fn mark_deleted(&mut self, now: Timestamp) -> bool {
        if self.status == RecordStatus::Deleted {
            return false;
        }
        self.status = RecordStatus::Deleted;
        self.slot_order = None;
        self.updated_at = now;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
