//! Slot assignment: single-slot replace and full-board reorder.
//!
//! Both operations hold the (vertical, kind) write guard from the first
//! index read to the last write, so concurrent calls against one board run
//! one after another and the last call decides the final layout. Writes that
//! completed before a store error or cancellation stay committed.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use showcase_core::error::CoreError;
use showcase_core::kinds::PlacementKind;
use showcase_core::listing::select_slotted;
use showcase_core::record::PlacementRecord;
use showcase_core::slot::{validate_board, Slot, SlotAssignment};
use showcase_core::types::RecordId;
use showcase_core::vertical::{Kind, Vertical};
use showcase_db::repositories::{IndexRepo, RecordRepo, SlotCacheRepo};
use showcase_events::{event_types, PlacementEvent};

use crate::error::PlacementResult;
use crate::state::{PlacementState, RequestContext};

/// Assigns records to the numbered slots of a (vertical, kind) board.
#[derive(Clone)]
pub struct SlotAssigner {
    pub(crate) state: PlacementState,
}

impl SlotAssigner {
    pub fn new(state: PlacementState) -> Self {
        Self { state }
    }

    /// Put `record_id` into `target_slot`, evicting whichever other active
    /// record holds it.
    ///
    /// Rejects before any write when the requester has no user id
    /// (`Unauthorized`), the slot is out of range
    /// (`Validation`), the id is not in this vertical's index (`NotFound`),
    /// the indexed record is missing from the store (`Inconsistent`), the
    /// requester does not own it (`Forbidden`), or it is deleted
    /// (`Conflict`).
    pub async fn assign_to_slot<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        record_id: RecordId,
        target_slot: i32,
    ) -> PlacementResult<PlacementRecord<P>> {
        ctx.ensure_identified()?;
        let slot = Slot::new(target_slot)?;
        let kind = P::KIND;

        let _guard = self.state.guards.acquire(vertical, kind).await;
        let session = self.state.db.session(&ctx.cancel);

        let ids = IndexRepo::get_ids(&session, vertical, kind).await?;
        if !ids.contains(&record_id) {
            return Err(not_found(kind, record_id).into());
        }

        // Read the whole board first; every check below runs before any write.
        let mut target = None;
        let mut occupants = Vec::new();
        for record in RecordRepo::find_many::<P>(&session, vertical, &ids).await? {
            if record.id == record_id {
                target = Some(record);
            } else if record.is_active() && record.slot() == Some(slot) {
                occupants.push(record);
            }
        }

        let mut target = target.ok_or_else(|| {
            CoreError::Inconsistent(format!(
                "{} {record_id} is indexed in {vertical} but missing from the store",
                kind.label()
            ))
        })?;
        ensure_owner(ctx, &target)?;

        let now = Utc::now();
        let previous = target.slot();
        target.assign_slot(slot, now)?;

        for mut occupant in occupants {
            occupant.clear_slot(now);
            RecordRepo::save(&session, &occupant).await?;
            tracing::info!(
                %vertical,
                %kind,
                record_id = %occupant.id,
                %slot,
                "Evicted slot occupant"
            );
        }

        RecordRepo::save(&session, &target).await?;
        SlotCacheRepo::set(&session, vertical, kind, slot, target.id).await?;
        if let Some(previous) = previous.filter(|p| *p != slot) {
            SlotCacheRepo::clear(&session, vertical, kind, previous).await?;
        }

        tracing::info!(
            %vertical,
            %kind,
            record_id = %target.id,
            %slot,
            user_id = %ctx.user_id(),
            "Assigned record to slot"
        );
        self.state.event_bus.publish(
            PlacementEvent::new(event_types::SLOT_ASSIGNED, vertical, kind)
                .with_record(target.id)
                .with_actor(ctx.user_id())
                .with_payload(serde_json::json!({
                    "slot": slot.get(),
                    "previous_slot": previous.map(Slot::get),
                })),
        );

        Ok(target)
    }

    /// Replace the whole board with `assignments`.
    ///
    /// Exactly six assignments covering slots 1..=6 are required; an empty
    /// record id leaves that slot vacant. Every referenced record is checked
    /// (indexed, stored, active, owned by the requester) before anything is
    /// written. Active records that held a slot but are absent from the new
    /// board are unslotted. Returns the resulting slotted listing.
    pub async fn reorder_slots<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        assignments: &[SlotAssignment],
    ) -> PlacementResult<Vec<PlacementRecord<P>>> {
        ctx.ensure_identified()?;
        let board = validate_board(assignments)?;
        let kind = P::KIND;

        let _guard = self.state.guards.acquire(vertical, kind).await;
        let session = self.state.db.session(&ctx.cancel);

        let ids = IndexRepo::get_ids(&session, vertical, kind).await?;
        let mut by_id: HashMap<RecordId, PlacementRecord<P>> =
            RecordRepo::find_many::<P>(&session, vertical, &ids)
                .await?
                .into_iter()
                .map(|r| (r.id, r))
                .collect();

        // Validate every assignment before the first write.
        for id in board.iter().filter_map(|(_, id)| *id) {
            if !ids.contains(&id) {
                return Err(not_found(kind, id).into());
            }
            let record = by_id.get(&id).ok_or_else(|| not_found(kind, id))?;
            if !record.is_active() {
                return Err(CoreError::Conflict(format!(
                    "{} {id} is deleted and cannot be placed in a slot",
                    kind.label()
                ))
                .into());
            }
            ensure_owner(ctx, record)?;
        }

        let now = Utc::now();
        let assigned: HashSet<RecordId> = board.iter().filter_map(|(_, id)| *id).collect();

        // Records left off the new board lose their slot before it is applied.
        for id in &ids {
            let Some(record) = by_id.get_mut(id) else {
                continue;
            };
            if assigned.contains(id) || !record.is_active() || record.slot().is_none() {
                continue;
            }
            record.clear_slot(now);
            RecordRepo::save(&session, record).await?;
            tracing::info!(%vertical, %kind, record_id = %id, "Unslotted record absent from new board");
        }

        for (slot, id) in &board {
            match id {
                None => SlotCacheRepo::clear(&session, vertical, kind, *slot).await?,
                Some(id) => {
                    let record = by_id.get_mut(id).ok_or_else(|| not_found(kind, *id))?;
                    record.assign_slot(*slot, now)?;
                    RecordRepo::save(&session, record).await?;
                    SlotCacheRepo::set(&session, vertical, kind, *slot, *id).await?;
                }
            }
        }

        tracing::info!(
            %vertical,
            %kind,
            filled = assigned.len(),
            user_id = %ctx.user_id(),
            "Reordered slots"
        );
        self.state.event_bus.publish(
            PlacementEvent::new(event_types::SLOTS_REORDERED, vertical, kind)
                .with_actor(ctx.user_id())
                .with_payload(serde_json::json!({
                    "slots": board
                        .iter()
                        .map(|(slot, id)| serde_json::json!({"slot": slot.get(), "record_id": id}))
                        .collect::<Vec<_>>(),
                })),
        );

        Ok(select_slotted(by_id.into_values().collect(), Utc::now().date_naive()))
    }
}

pub(crate) fn not_found(kind: Kind, id: RecordId) -> CoreError {
    CoreError::NotFound {
        entity: kind.label(),
        id: id.to_string(),
    }
}

/// Only the record's owner may move it between slots.
fn ensure_owner<P>(ctx: &RequestContext, record: &PlacementRecord<P>) -> Result<(), CoreError> {
    if ctx.requester.owns(&record.owner_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "User {} does not own record {}",
            ctx.user_id(),
            record.id
        )))
    }
}
