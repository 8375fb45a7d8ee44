mod common;

use chrono::{Duration, Utc};
use serde_json::json;
use showcase_core::kinds::SeasonalPick;
use showcase_core::listing::exceeds_board;
use showcase_core::vertical::{Kind, Vertical};
use showcase_db::repositories::IndexRepo;
use uuid::Uuid;

use common::*;

const V: Vertical = Vertical::Classifieds;

#[tokio::test]
async fn test_empty_board_lists_nothing() {
    let h = harness();
    let ctx = editor("alice");
    assert!(h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
    assert!(h.assigner.get_slotted::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_active_listing_is_newest_update_first() {
    let h = harness();
    let ctx = editor("alice");
    let a = create_pick(&h, &ctx, V, "A").await;
    create_pick(&h, &ctx, V, "B").await;
    create_pick(&h, &ctx, V, "C").await;

    assert_eq!(
        titles(&h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap()),
        vec!["C", "B", "A"]
    );

    // Slotting and unslotting A bumps its updated_at.
    h.assigner
        .assign_to_slot::<SeasonalPick>(&ctx, V, a.id, 1)
        .await
        .unwrap();
    h.assigner
        .reorder_slots::<SeasonalPick>(&ctx, V, &board([None; 6]))
        .await
        .unwrap();

    assert_eq!(
        titles(&h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap()),
        vec!["A", "C", "B"]
    );
}

#[tokio::test]
async fn test_records_outside_their_window_are_hidden() {
    let h = harness();
    let ctx = editor("alice");
    let today = Utc::now().date_naive();

    let mut expired = pick("Expired");
    expired.start_date = Some(today - Duration::days(30));
    expired.end_date = Some(today - Duration::days(1));
    let mut upcoming = pick("Upcoming");
    upcoming.start_date = Some(today + Duration::days(1));
    let mut current = pick("Current");
    current.start_date = Some(today);
    current.end_date = Some(today);

    let expired = h.lifecycle.create(&ctx, V, expired).await.unwrap();
    h.lifecycle.create(&ctx, V, upcoming).await.unwrap();
    h.lifecycle.create(&ctx, V, current).await.unwrap();

    let active = h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap();
    assert_eq!(titles(&active), vec!["Current"]);

    // A slotted record past its window drops out of the slotted listing too.
    h.assigner
        .assign_to_slot::<SeasonalPick>(&ctx, V, expired.id, 2)
        .await
        .unwrap();
    assert!(h.assigner.get_slotted::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_stored_slot_reads_as_unslotted() {
    let h = harness();
    let ctx = editor("alice");
    let a = create_pick(&h, &ctx, V, "A").await;
    let b = create_pick(&h, &ctx, V, "B").await;
    force_slot_order(&h, V, a.id, json!(9)).await;
    force_slot_order(&h, V, b.id, json!(null)).await;

    assert!(h.assigner.get_slotted::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
    assert_eq!(
        titles(&h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap()),
        vec!["B", "A"]
    );
}

#[tokio::test]
async fn test_corrupted_board_is_still_listed() {
    let h = harness();
    let ctx = editor("alice");
    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D", "E", "F", "G"] {
        ids.push(create_pick(&h, &ctx, V, title).await.id);
    }
    // Written around the engine: six distinct slots plus a second holder of slot 3.
    for (i, id) in ids.iter().take(6).enumerate() {
        force_slot_order(&h, V, *id, json!(i + 1)).await;
    }
    force_slot_order(&h, V, ids[6], json!(3)).await;

    let slotted = h.assigner.get_slotted::<SeasonalPick>(&ctx, V).await.unwrap();
    assert_eq!(slotted.len(), 7);
    assert!(exceeds_board(&slotted));
    let slots: Vec<i32> = slotted.iter().filter_map(|r| r.slot()).map(|s| s.get()).collect();
    assert_eq!(slots, vec![1, 2, 3, 3, 4, 5, 6]);

    assert_eq!(slot_holders(&h, V).await, vec![(3, 2)]);
}

#[tokio::test]
async fn test_deleted_record_with_stale_slot_is_not_listed() {
    let h = harness();
    let ctx = editor("alice");
    let a = create_pick(&h, &ctx, V, "A").await;
    h.lifecycle
        .soft_delete::<SeasonalPick>(&ctx, V, a.id)
        .await
        .unwrap();
    force_slot_order(&h, V, a.id, json!(4)).await;

    assert!(h.assigner.get_slotted::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
    assert!(h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap().is_empty());
    assert!(slot_holders(&h, V).await.is_empty());
}

#[tokio::test]
async fn test_dangling_index_entry_is_skipped() {
    let h = harness();
    let ctx = editor("alice");
    create_pick(&h, &ctx, V, "A").await;
    let ghost = Uuid::new_v4();
    {
        let session = h.state.db.session(&ctx.cancel);
        IndexRepo::add_id(&session, V, Kind::SeasonalPick, ghost)
            .await
            .unwrap();
    }

    let active = h.assigner.get_active::<SeasonalPick>(&ctx, V).await.unwrap();
    assert_eq!(titles(&active), vec!["A"]);
}
