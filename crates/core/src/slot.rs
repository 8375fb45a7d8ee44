//! Numbered display slots and slot-board validation.
//!
//! Each (vertical, kind) pair has exactly [`SLOT_COUNT`] slots numbered
//! `MIN_SLOT..=MAX_SLOT`. Nothing stores a slot on its own: a slot is the
//! `slot_order` of whichever active record holds it.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::RecordId;

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Lowest slot number.
pub const MIN_SLOT: i32 = 1;

/// Highest slot number.
pub const MAX_SLOT: i32 = 6;

/// Number of slots per (vertical, kind) board.
pub const SLOT_COUNT: usize = 6;

/* --------------------------------------------------------------------------
   Slot
   -------------------------------------------------------------------------- */

/// A slot number guaranteed to lie in `MIN_SLOT..=MAX_SLOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i32")]
pub struct Slot(u8);

impl Slot {
    /// Validate a caller-supplied slot number.
    pub fn new(value: i32) -> Result<Self, CoreError> {
        Self::from_stored(Some(value)).ok_or_else(|| {
            CoreError::Validation(format!(
                "Slot must be between {MIN_SLOT} and {MAX_SLOT}, got {value}"
            ))
        })
    }

    /// Interpret a stored `slot_order`.
    ///
    /// `None`, the legacy `0` sentinel, and any out-of-range value all read
    /// as "unslotted".
    pub fn from_stored(value: Option<i32>) -> Option<Self> {
        match value {
            Some(v) if (MIN_SLOT..=MAX_SLOT).contains(&v) => Some(Self(v as u8)),
            _ => None,
        }
    }

    pub fn get(self) -> i32 {
        i32::from(self.0)
    }

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (MIN_SLOT..=MAX_SLOT).map(|v| Slot(v as u8))
    }
}

impl From<Slot> for i32 {
    fn from(slot: Slot) -> Self {
        slot.get()
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Slot::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* --------------------------------------------------------------------------
   Slot assignments (reorder input)
   -------------------------------------------------------------------------- */

/// One entry of a full-board reorder request.
///
/// An empty `record_id` (absent, `null`, or `""` on the wire) leaves the
/// slot vacant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: i32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub record_id: Option<RecordId>,
}

impl SlotAssignment {
    pub fn filled(slot: i32, record_id: RecordId) -> Self {
        Self {
            slot,
            record_id: Some(record_id),
        }
    }

    pub fn empty(slot: i32) -> Self {
        Self {
            slot,
            record_id: None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => RecordId::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A reorder request that passed [`validate_board`], in caller order.
pub type SlotBoard = Vec<(Slot, Option<RecordId>)>;

/// Validate a full-board reorder request without touching storage.
///
/// - Exactly [`SLOT_COUNT`] assignments.
/// - Every slot number in range, and together they cover each slot once.
/// - A record id appears in at most one slot.
pub fn validate_board(assignments: &[SlotAssignment]) -> Result<SlotBoard, CoreError> {
    if assignments.len() != SLOT_COUNT {
        return Err(CoreError::Validation(format!(
            "Exactly {SLOT_COUNT} slot assignments are required, got {}",
            assignments.len()
        )));
    }

    let mut seen_slots = HashSet::with_capacity(SLOT_COUNT);
    let mut seen_records = HashSet::with_capacity(SLOT_COUNT);
    let mut board = Vec::with_capacity(SLOT_COUNT);

    for assignment in assignments {
        let slot = Slot::new(assignment.slot)?;
        if !seen_slots.insert(slot) {
            return Err(CoreError::Validation(format!(
                "Slot {slot} is assigned more than once"
            )));
        }
        if let Some(id) = assignment.record_id {
            if !seen_records.insert(id) {
                return Err(CoreError::Validation(format!(
                    "Record {id} is assigned to more than one slot"
                )));
            }
        }
        board.push((slot, assignment.record_id));
    }

    Ok(board)
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn full_board(ids: [Option<RecordId>; 6]) -> Vec<SlotAssignment> {
        ids.into_iter()
            .enumerate()
            .map(|(i, record_id)| SlotAssignment {
                slot: i as i32 + 1,
                record_id,
            })
            .collect()
    }

    // --- Slot ---

    #[test]
    fn slot_accepts_range() {
        for v in MIN_SLOT..=MAX_SLOT {
            assert_eq!(Slot::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn slot_rejects_out_of_range() {
        for v in [-1, 0, 7, 100] {
            let err = Slot::new(v).unwrap_err();
            assert!(err.to_string().contains("between 1 and 6"));
        }
    }

    #[test]
    fn stored_zero_and_garbage_read_as_unslotted() {
        assert_eq!(Slot::from_stored(None), None);
        assert_eq!(Slot::from_stored(Some(0)), None);
        assert_eq!(Slot::from_stored(Some(42)), None);
        assert_eq!(Slot::from_stored(Some(-3)), None);
        assert_eq!(Slot::from_stored(Some(4)).map(Slot::get), Some(4));
    }

    #[test]
    fn all_slots_ascending() {
        let all: Vec<i32> = Slot::all().map(Slot::get).collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);
    }

    // --- Assignment parsing ---

    #[test]
    fn empty_string_record_id_is_vacant() {
        let parsed: SlotAssignment =
            serde_json::from_value(serde_json::json!({"slot": 4, "record_id": ""})).unwrap();
        assert_eq!(parsed, SlotAssignment::empty(4));

        let parsed: SlotAssignment =
            serde_json::from_value(serde_json::json!({"slot": 5})).unwrap();
        assert_eq!(parsed, SlotAssignment::empty(5));
    }

    #[test]
    fn malformed_record_id_fails_to_parse() {
        let parsed: Result<SlotAssignment, _> =
            serde_json::from_value(serde_json::json!({"slot": 1, "record_id": "not-a-uuid"}));
        assert!(parsed.is_err());
    }

    // --- Board validation ---

    #[test]
    fn valid_board_preserves_caller_order() {
        let a = Uuid::new_v4();
        let mut assignments = full_board([Some(a), None, None, None, None, None]);
        assignments.reverse();

        let board = validate_board(&assignments).unwrap();
        assert_eq!(board.len(), SLOT_COUNT);
        assert_eq!(board[0].0.get(), 6);
        assert_eq!(board[5], (Slot::new(1).unwrap(), Some(a)));
    }

    #[test]
    fn board_requires_exactly_six() {
        let mut assignments = full_board([None; 6]);
        assignments.pop();
        let err = validate_board(&assignments).unwrap_err();
        assert!(err.to_string().contains("Exactly 6"));
    }

    #[test]
    fn board_rejects_duplicate_slot() {
        let mut assignments = full_board([None; 6]);
        assignments[5].slot = 1;
        let err = validate_board(&assignments).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn board_rejects_out_of_range_slot() {
        let mut assignments = full_board([None; 6]);
        assignments[5].slot = 7;
        assert!(validate_board(&assignments).is_err());
    }

    #[test]
    fn board_rejects_record_in_two_slots() {
        let a = Uuid::new_v4();
        let assignments = full_board([Some(a), Some(a), None, None, None, None]);
        let err = validate_board(&assignments).unwrap_err();
        assert!(err.to_string().contains("more than one slot"));
    }
}
