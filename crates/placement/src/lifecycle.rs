//! Record creation, lookup, and soft delete.

use chrono::Utc;
use showcase_core::error::CoreError;
use showcase_core::kinds::PlacementKind;
use showcase_core::record::{NewPlacement, PlacementRecord};
use showcase_core::types::RecordId;
use showcase_core::vertical::Vertical;
use showcase_db::repositories::{IndexRepo, RecordRepo, SlotCacheRepo};
use showcase_events::{event_types, PlacementEvent};
use uuid::Uuid;

use crate::assigner::{not_found, SlotAssigner};
use crate::error::PlacementResult;
use crate::state::{PlacementState, RequestContext};

/// Creates records and retires them with soft delete.
#[derive(Clone)]
pub struct LifecycleManager {
    state: PlacementState,
    assigner: SlotAssigner,
}

impl LifecycleManager {
    pub fn new(state: PlacementState) -> Self {
        Self {
            assigner: SlotAssigner::new(state.clone()),
            state,
        }
    }

    /// Validate `input`, store a new active record owned by the requester,
    /// and append it to the vertical's index.
    ///
    /// The record write and the index append are separate store calls; a
    /// failure between them leaves an unindexed record that
    /// `Maintenance::audit_index` cannot see and listings never return.
    /// With `initial_slot` set, the record is then placed through
    /// [`SlotAssigner::assign_to_slot`]. If that placement fails, the error
    /// is returned but the record stays stored and indexed, unslotted; a
    /// caller retrying should place the existing record (it shows up in
    /// `get_active`) rather than create it again.
    pub async fn create<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        input: NewPlacement<P>,
    ) -> PlacementResult<PlacementRecord<P>> {
        ctx.ensure_identified()?;
        input.validate()?;
        let kind = P::KIND;
        let initial_slot = input.initial_slot;

        let record = PlacementRecord::create(
            Uuid::new_v4(),
            vertical,
            ctx.requester.user_id.clone(),
            input,
            Utc::now(),
        );

        {
            let session = self.state.db.session(&ctx.cancel);
            RecordRepo::save(&session, &record).await?;

            let _guard = self.state.guards.acquire(vertical, kind).await;
            IndexRepo::add_id(&session, vertical, kind, record.id).await?;
        }

        tracing::info!(
            %vertical,
            %kind,
            record_id = %record.id,
            name = record.fields.display_name(),
            user_id = %ctx.user_id(),
            "Created placement record"
        );
        self.state.event_bus.publish(
            PlacementEvent::new(event_types::CREATED, vertical, kind)
                .with_record(record.id)
                .with_actor(ctx.user_id()),
        );

        match initial_slot {
            Some(slot) => {
                self.assigner
                    .assign_to_slot(ctx, vertical, record.id, slot)
                    .await
            }
            None => Ok(record),
        }
    }

    /// Fetch one record by id, deleted or not.
    ///
    /// Records are keyed by id alone, so the (vertical, kind) index decides
    /// membership: an id indexed under another kind or vertical is
    /// `NotFound`.
    pub async fn get<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        id: RecordId,
    ) -> PlacementResult<PlacementRecord<P>> {
        let session = self.state.db.session(&ctx.cancel);
        if !IndexRepo::contains(&session, vertical, P::KIND, id).await? {
            return Err(not_found(P::KIND, id).into());
        }
        RecordRepo::find_by_id::<P>(&session, vertical, id)
            .await?
            .ok_or_else(|| not_found(P::KIND, id).into())
    }

    /// Mark a record deleted and drop it from its slot.
    ///
    /// Only the owner or an admin may delete. Deleting an already deleted
    /// record succeeds without writing.
    pub async fn soft_delete<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        id: RecordId,
    ) -> PlacementResult<PlacementRecord<P>> {
        ctx.ensure_identified()?;
        let kind = P::KIND;
        let _guard = self.state.guards.acquire(vertical, kind).await;
        let session = self.state.db.session(&ctx.cancel);

        if !IndexRepo::contains(&session, vertical, kind, id).await? {
            tracing::debug!(%vertical, %kind, record_id = %id, "Delete target not in this vertical");
            return Err(not_found(kind, id).into());
        }

        let mut record = RecordRepo::find_by_id::<P>(&session, vertical, id)
            .await?
            .ok_or_else(|| not_found(kind, id))?;

        if !record.is_owned_by(ctx.user_id()) && !ctx.requester.is_admin() {
            return Err(CoreError::Forbidden(format!(
                "User {} may not delete record {id}",
                ctx.user_id()
            ))
            .into());
        }

        let previous_slot = record.slot();
        if !record.mark_deleted(Utc::now()) {
            tracing::debug!(%vertical, %kind, record_id = %id, "Record already deleted");
            return Ok(record);
        }
        RecordRepo::save(&session, &record).await?;

        if let Some(slot) = previous_slot {
            if SlotCacheRepo::get(&session, vertical, kind, slot).await? == Some(id) {
                SlotCacheRepo::clear(&session, vertical, kind, slot).await?;
            }
        }

        tracing::info!(
            %vertical,
            %kind,
            record_id = %id,
            user_id = %ctx.user_id(),
            "Soft-deleted placement record"
        );
        self.state.event_bus.publish(
            PlacementEvent::new(event_types::DELETED, vertical, kind)
                .with_record(id)
                .with_actor(ctx.user_id()),
        );

        Ok(record)
    }
}
