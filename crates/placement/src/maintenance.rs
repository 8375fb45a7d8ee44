//! Index audits and slot cache rebuilds.
//!
//! The slot cache (`<kind>-slot-<n>`) is derived data; record `slot_order`
//! values are authoritative. These jobs recompute the cache from the index
//! and report index entries that no longer resolve to a record.

use serde::Serialize;
use showcase_core::kinds::{FeaturedCategory, FeaturedStore, PlacementKind, SeasonalPick};
use showcase_core::listing::{detect_slot_violations, SlotViolation};
use showcase_core::slot::Slot;
use showcase_core::types::RecordId;
use showcase_core::vertical::{Kind, Vertical};
use showcase_db::repositories::{IndexRepo, RecordRepo, SlotCacheRepo};
use showcase_events::{event_types, PlacementEvent};

use crate::error::PlacementResult;
use crate::state::{PlacementState, RequestContext};

/* --------------------------------------------------------------------------
   Reports
   -------------------------------------------------------------------------- */

/// Consistency report for one (vertical, kind) index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexAudit {
    pub vertical: Vertical,
    pub kind: Kind,
    /// Number of ids in the index.
    pub indexed: usize,
    /// Indexed ids with no stored record.
    pub dangling_ids: Vec<RecordId>,
    /// Slots held by more than one active record.
    pub slot_violations: Vec<SlotViolation>,
}

impl IndexAudit {
    pub fn is_clean(&self) -> bool {
        self.dangling_ids.is_empty() && self.slot_violations.is_empty()
    }
}

/// Outcome of rebuilding one board's slot cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotCacheRebuild {
    pub vertical: Vertical,
    pub kind: Kind,
    /// Slots whose cache entry now names an occupant.
    pub filled: Vec<Slot>,
    /// Slots whose cache entry was removed.
    pub vacant: Vec<Slot>,
}

/// Combined result of [`Maintenance::run_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaintenanceReport {
    pub audits: Vec<IndexAudit>,
    pub rebuilds: Vec<SlotCacheRebuild>,
}

/* --------------------------------------------------------------------------
   Jobs
   -------------------------------------------------------------------------- */

#[derive(Clone)]
pub struct Maintenance {
    state: PlacementState,
}

impl Maintenance {
    pub fn new(state: PlacementState) -> Self {
        Self { state }
    }

    /// Check one index for dangling ids and duplicate slot holders.
    pub async fn audit_index<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
    ) -> PlacementResult<IndexAudit> {
        let kind = P::KIND;
        let session = self.state.db.session(&ctx.cancel);
        let ids = IndexRepo::get_ids(&session, vertical, kind).await?;

        let mut dangling_ids = Vec::new();
        let mut records = Vec::with_capacity(ids.len());
        for (id, record) in RecordRepo::find_each::<P>(&session, vertical, &ids).await? {
            match record {
                Some(record) => records.push(record),
                None => dangling_ids.push(id),
            }
        }

        let audit = IndexAudit {
            vertical,
            kind,
            indexed: ids.len(),
            dangling_ids,
            slot_violations: detect_slot_violations(&records),
        };
        if !audit.is_clean() {
            tracing::warn!(
                %vertical,
                %kind,
                dangling = audit.dangling_ids.len(),
                violations = audit.slot_violations.len(),
                "Index audit found problems"
            );
        }
        Ok(audit)
    }

    /// Recompute every slot cache entry of one board from the records.
    ///
    /// When two active records claim a slot, the one earlier in the index
    /// wins the cache entry; the conflict itself is left for `audit_index`
    /// to report.
    pub async fn rebuild_slot_cache<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
    ) -> PlacementResult<SlotCacheRebuild> {
        let kind = P::KIND;
        let _guard = self.state.guards.acquire(vertical, kind).await;
        let session = self.state.db.session(&ctx.cancel);

        let ids = IndexRepo::get_ids(&session, vertical, kind).await?;
        let records = RecordRepo::find_many::<P>(&session, vertical, &ids).await?;

        let mut rebuild = SlotCacheRebuild {
            vertical,
            kind,
            filled: Vec::new(),
            vacant: Vec::new(),
        };
        for slot in Slot::all() {
            let occupant = records
                .iter()
                .find(|r| r.is_active() && r.slot() == Some(slot));
            match occupant {
                Some(record) => {
                    SlotCacheRepo::set(&session, vertical, kind, slot, record.id).await?;
                    rebuild.filled.push(slot);
                }
                None => {
                    SlotCacheRepo::clear(&session, vertical, kind, slot).await?;
                    rebuild.vacant.push(slot);
                }
            }
        }

        tracing::info!(
            %vertical,
            %kind,
            filled = rebuild.filled.len(),
            "Rebuilt slot cache"
        );
        self.state.event_bus.publish(
            PlacementEvent::new(event_types::SLOT_CACHE_REBUILT, vertical, kind)
                .with_actor(ctx.user_id()),
        );
        Ok(rebuild)
    }

    /// Audit and rebuild every board of every vertical.
    pub async fn run_all(&self, ctx: &RequestContext) -> PlacementResult<MaintenanceReport> {
        let mut report = MaintenanceReport::default();
        for vertical in Vertical::ALL {
            self.run_board::<SeasonalPick>(ctx, vertical, &mut report).await?;
            self.run_board::<FeaturedStore>(ctx, vertical, &mut report).await?;
            self.run_board::<FeaturedCategory>(ctx, vertical, &mut report).await?;
        }
        Ok(report)
    }

    async fn run_board<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
        report: &mut MaintenanceReport,
    ) -> PlacementResult<()> {
        report.audits.push(self.audit_index::<P>(ctx, vertical).await?);
        report
            .rebuilds
            .push(self.rebuild_slot_cache::<P>(ctx, vertical).await?);
        Ok(())
    }
}
