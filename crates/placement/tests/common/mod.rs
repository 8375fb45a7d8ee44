#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use showcase_core::kinds::SeasonalPick;
use showcase_core::record::{NewPlacement, PlacementRecord};
use showcase_core::requester::Requester;
use showcase_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use showcase_core::slot::SlotAssignment;
use showcase_core::types::RecordId;
use showcase_core::vertical::Vertical;
use showcase_db::{Db, InMemoryStore, KeyValueStore, StoreNames};
use showcase_events::EventBus;
use showcase_placement::{LifecycleManager, Maintenance, PlacementState, RequestContext, SlotAssigner};

/// Everything a test needs, wired against one in-memory store.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub state: PlacementState,
    pub assigner: SlotAssigner,
    pub lifecycle: LifecycleManager,
    pub maintenance: Maintenance,
}

pub fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let db = Db::new(store.clone(), StoreNames::default());
    let state = PlacementState::new(db, Arc::new(EventBus::default()));
    Harness {
        store,
        assigner: SlotAssigner::new(state.clone()),
        lifecycle: LifecycleManager::new(state.clone()),
        maintenance: Maintenance::new(state.clone()),
        state,
    }
}

pub fn editor(user_id: &str) -> RequestContext {
    RequestContext::new(Requester::new(user_id, ROLE_EDITOR))
}

pub fn admin(user_id: &str) -> RequestContext {
    RequestContext::new(Requester::new(user_id, ROLE_ADMIN))
}

pub fn store_name(vertical: Vertical) -> &'static str {
    match vertical {
        Vertical::Classifieds => "classifieds-store",
        Vertical::Services => "services-store",
    }
}

pub fn pick(title: &str) -> NewPlacement<SeasonalPick> {
    NewPlacement::new(SeasonalPick {
        title: title.to_string(),
        description: None,
        image_url: format!("https://cdn.example.com/{}.png", title.to_lowercase()),
        link_url: None,
    })
}

/// Create an unslotted seasonal pick, spaced out so `updated_at` values
/// differ between consecutive calls.
pub async fn create_pick(
    h: &Harness,
    ctx: &RequestContext,
    vertical: Vertical,
    title: &str,
) -> PlacementRecord<SeasonalPick> {
    let record = h
        .lifecycle
        .create(ctx, vertical, pick(title))
        .await
        .expect("create should succeed");
    tokio::time::sleep(Duration::from_millis(3)).await;
    record
}

/// Build a six-entry reorder request; `None` leaves the slot empty.
pub fn board(ids: [Option<RecordId>; 6]) -> Vec<SlotAssignment> {
    ids.into_iter()
        .enumerate()
        .map(|(i, record_id)| SlotAssignment {
            slot: i as i32 + 1,
            record_id,
        })
        .collect()
}

/// `(title, slot)` pairs for compact assertions.
pub fn titled_slots(records: &[PlacementRecord<SeasonalPick>]) -> Vec<(String, Option<i32>)> {
    records
        .iter()
        .map(|r| (r.fields.title.clone(), r.slot().map(|s| s.get())))
        .collect()
}

pub fn titles(records: &[PlacementRecord<SeasonalPick>]) -> Vec<String> {
    records.iter().map(|r| r.fields.title.clone()).collect()
}

/// Overwrite a stored record's raw `slot_order`, bypassing the engine.
pub async fn force_slot_order(
    h: &Harness,
    vertical: Vertical,
    id: RecordId,
    slot_order: serde_json::Value,
) {
    let store = store_name(vertical);
    let key = id.to_string();
    let mut value = h
        .store
        .get(store, &key)
        .await
        .unwrap()
        .expect("record should exist");
    value["slot_order"] = slot_order;
    h.store.set(store, &key, value).await.unwrap();
}

/// Load a record straight from the store.
pub async fn load(h: &Harness, vertical: Vertical, id: RecordId) -> PlacementRecord<SeasonalPick> {
    h.lifecycle
        .get::<SeasonalPick>(&admin("inspector"), vertical, id)
        .await
        .expect("record should load")
}

/// Active records per slot number, for exclusivity checks.
pub async fn slot_holders(h: &Harness, vertical: Vertical) -> Vec<(i32, usize)> {
    let ctx = admin("inspector");
    let audit = h
        .maintenance
        .audit_index::<SeasonalPick>(&ctx, vertical)
        .await
        .unwrap();
    audit
        .slot_violations
        .iter()
        .map(|v| (v.slot.get(), v.record_ids.len()))
        .collect()
}
