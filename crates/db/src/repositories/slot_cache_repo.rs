//! Repository for slot cache entries (key `<kind>-slot-<n>`).
//!
//! Each entry holds the id of the record in that slot. The cache is a
//! secondary lookup only: record `slot_order` values are authoritative and
//! the cache can be rebuilt from the index at any time.

use showcase_core::slot::Slot;
use showcase_core::types::RecordId;
use showcase_core::vertical::{Kind, Vertical};

use crate::keys::slot_key;
use crate::session::StoreSession;
use crate::store::StoreError;

pub struct SlotCacheRepo;

impl SlotCacheRepo {
    pub async fn get(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
        slot: Slot,
    ) -> Result<Option<RecordId>, StoreError> {
        session.get_json(vertical, &slot_key(kind, slot)).await
    }

    pub async fn set(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
        slot: Slot,
        id: RecordId,
    ) -> Result<(), StoreError> {
        session.set_json(vertical, &slot_key(kind, slot), &id).await
    }

    pub async fn clear(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
        slot: Slot,
    ) -> Result<(), StoreError> {
        session.delete(vertical, &slot_key(kind, slot)).await
    }
}
