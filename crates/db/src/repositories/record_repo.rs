//! Repository for individual placement records (key `<recordId>`).

use futures::future::try_join_all;
use showcase_core::kinds::PlacementKind;
use showcase_core::record::PlacementRecord;
use showcase_core::types::RecordId;
use showcase_core::vertical::Vertical;

use crate::keys::record_key;
use crate::session::StoreSession;
use crate::store::StoreError;

/// Get/put access to placement records. No delete: records leave listings
/// through soft delete only.
pub struct RecordRepo;

impl RecordRepo {
    /// Load one record by id from the vertical's store.
    pub async fn find_by_id<P: PlacementKind>(
        session: &StoreSession<'_>,
        vertical: Vertical,
        id: RecordId,
    ) -> Result<Option<PlacementRecord<P>>, StoreError> {
        session.get_json(vertical, &record_key(id)).await
    }

    /// Upsert a record under its own id. Last writer wins.
    pub async fn save<P: PlacementKind>(
        session: &StoreSession<'_>,
        record: &PlacementRecord<P>,
    ) -> Result<(), StoreError> {
        session
            .set_json(record.vertical, &record_key(record.id), record)
            .await
    }

    /// Load every id concurrently, pairing each id with its record (or
    /// `None`), in input order.
    pub async fn find_each<P: PlacementKind>(
        session: &StoreSession<'_>,
        vertical: Vertical,
        ids: &[RecordId],
    ) -> Result<Vec<(RecordId, Option<PlacementRecord<P>>)>, StoreError> {
        let loaded = try_join_all(
            ids.iter()
                .map(|id| Self::find_by_id::<P>(session, vertical, *id)),
        )
        .await?;
        Ok(ids.iter().copied().zip(loaded).collect())
    }

    /// Like [`find_each`](Self::find_each), but drops ids with no stored
    /// record after logging them; they indicate an index entry whose record
    /// was never written or was lost.
    pub async fn find_many<P: PlacementKind>(
        session: &StoreSession<'_>,
        vertical: Vertical,
        ids: &[RecordId],
    ) -> Result<Vec<PlacementRecord<P>>, StoreError> {
        Ok(Self::find_each::<P>(session, vertical, ids)
            .await?
            .into_iter()
            .filter_map(|(id, record)| {
                if record.is_none() {
                    tracing::warn!(
                        %vertical,
                        kind = %P::KIND,
                        record_id = %id,
                        "Indexed record is missing from the store"
                    );
                }
                record
            })
            .collect())
    }
}
