//! Repository for the per-(vertical, kind) id index
//! (key `<kind>-index-<vertical>`).
//!
//! The index is the fan-out seed for every listing. It is stored as one JSON
//! array and rewritten whole on each change; callers that mutate it must
//! hold the (vertical, kind) write guard.

use showcase_core::types::RecordId;
use showcase_core::vertical::{Kind, Vertical};

use crate::keys::index_key;
use crate::session::StoreSession;
use crate::store::StoreError;

pub struct IndexRepo;

impl IndexRepo {
    /// Ids in insertion order. A never-written index is empty, not an error.
    pub async fn get_ids(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
    ) -> Result<Vec<RecordId>, StoreError> {
        let ids = session
            .get_json::<Vec<RecordId>>(vertical, &index_key(kind, vertical))
            .await?;
        Ok(ids.unwrap_or_default())
    }

    /// Append `id` unless already present. Returns `true` if the list changed.
    pub async fn add_id(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
        id: RecordId,
    ) -> Result<bool, StoreError> {
        let mut ids = Self::get_ids(session, vertical, kind).await?;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        session
            .set_json(vertical, &index_key(kind, vertical), &ids)
            .await?;
        Ok(true)
    }

    pub async fn contains(
        session: &StoreSession<'_>,
        vertical: Vertical,
        kind: Kind,
        id: RecordId,
    ) -> Result<bool, StoreError> {
        Ok(Self::get_ids(session, vertical, kind).await?.contains(&id))
    }
}
