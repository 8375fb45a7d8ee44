//! Board listings. Lock-free: they read whatever the last writer left.

use chrono::Utc;
use showcase_core::kinds::PlacementKind;
use showcase_core::listing::{detect_slot_violations, exceeds_board, select_active, select_slotted};
use showcase_core::record::PlacementRecord;
use showcase_core::vertical::Vertical;
use showcase_db::repositories::{IndexRepo, RecordRepo};

use crate::assigner::SlotAssigner;
use crate::error::PlacementResult;
use crate::state::RequestContext;

impl SlotAssigner {
    /// Active, live records that hold no valid slot, newest `updated_at`
    /// first.
    pub async fn get_active<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
    ) -> PlacementResult<Vec<PlacementRecord<P>>> {
        let records = self.load_board::<P>(ctx, vertical).await?;
        Ok(select_active(records, Utc::now().date_naive()))
    }

    /// Active, live records holding a slot, ascending by slot.
    ///
    /// Two records sharing a slot (or more than six results) means the board
    /// was corrupted outside the guarded write path; the listing is still
    /// returned and the violation logged.
    pub async fn get_slotted<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
    ) -> PlacementResult<Vec<PlacementRecord<P>>> {
        let records = self.load_board::<P>(ctx, vertical).await?;

        let violations = detect_slot_violations(&records);
        if !violations.is_empty() {
            tracing::warn!(
                %vertical,
                kind = %P::KIND,
                ?violations,
                "Slot exclusivity violated"
            );
        }

        let slotted = select_slotted(records, Utc::now().date_naive());
        if exceeds_board(&slotted) {
            tracing::warn!(
                %vertical,
                kind = %P::KIND,
                count = slotted.len(),
                "More slotted records than slots"
            );
        }
        Ok(slotted)
    }

    /// Every stored record of the board, in index order.
    async fn load_board<P: PlacementKind>(
        &self,
        ctx: &RequestContext,
        vertical: Vertical,
    ) -> PlacementResult<Vec<PlacementRecord<P>>> {
        let session = self.state.db.session(&ctx.cancel);
        let ids = IndexRepo::get_ids(&session, vertical, P::KIND).await?;
        Ok(RecordRepo::find_many::<P>(&session, vertical, &ids).await?)
    }
}
