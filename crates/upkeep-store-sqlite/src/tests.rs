//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, TimeZone, Utc};
use upkeep_core::{
  asset::NewAsset,
  item::{ItemKind, NewItem},
  schedule::{DueStatus, Frequency},
  store::MaintenanceStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn press(asset_id: i64) -> NewAsset {
  NewAsset {
    asset_id,
    name:     "Press A".into(),
    kind:     "press".into(),
    location: "line 1".into(),
  }
}

fn lube_pm(item_id: i64, asset_id: i64) -> NewItem {
  let mut input = NewItem::new(item_id, asset_id, "lubricate main bearing");
  input.frequency = Some(Frequency::SevenDays);
  input
}

// ─── Migration ───────────────────────────────────────────────────────────────

#[test]
fn migrate_is_idempotent() {
  let mut conn = rusqlite::Connection::open_in_memory().unwrap();

  crate::schema::migrate(&mut conn).unwrap();
  crate::schema::migrate(&mut conn).unwrap();

  let version: i64 = conn
    .query_row("PRAGMA user_version", [], |row| row.get(0))
    .unwrap();
  assert_eq!(version, 1);
}

// ─── Assets ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_asset() {
  let s = store().await;

  let asset = s.add_asset(press(1)).await.unwrap();
  assert_eq!(asset.asset_id, 1);

  let fetched = s.get_asset(1).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Press A");
  assert_eq!(fetched.kind, "press");
  assert_eq!(fetched.location, "line 1");
}

#[tokio::test]
async fn get_asset_missing_returns_none() {
  let s = store().await;
  assert!(s.get_asset(99).await.unwrap().is_none());
}

#[tokio::test]
async fn add_asset_rejects_non_positive_id() {
  let s = store().await;

  let err = s.add_asset(press(0)).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(upkeep_core::Error::InvalidId { field: "asset_id", .. })
  ));

  let err = s.add_asset(press(-3)).await.unwrap_err();
  assert!(err.is_validation());
}

#[tokio::test]
async fn add_asset_rejects_blank_name() {
  let s = store().await;

  let mut input = press(1);
  input.name = "  ".into();
  let err = s.add_asset(input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(upkeep_core::Error::EmptyField("name"))
  ));
}

#[tokio::test]
async fn add_asset_duplicate_rejected() {
  let s = store().await;
  s.add_asset(press(7)).await.unwrap();

  let err = s.add_asset(press(7)).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateAsset(7)));
  assert!(err.is_duplicate());

  // Original row untouched.
  assert_eq!(s.list_assets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_assets_in_id_order() {
  let s = store().await;
  s.add_asset(press(3)).await.unwrap();
  s.add_asset(press(1)).await.unwrap();
  s.add_asset(press(2)).await.unwrap();

  let ids: Vec<i64> = s
    .list_assets()
    .await
    .unwrap()
    .iter()
    .map(|a| a.asset_id)
    .collect();
  assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn delete_asset_missing_is_noop() {
  let s = store().await;
  s.add_asset(press(1)).await.unwrap();

  assert!(s.delete_asset(1).await.unwrap());
  assert!(!s.delete_asset(1).await.unwrap());
  assert!(!s.delete_asset(42).await.unwrap());
  assert!(s.list_assets().await.unwrap().is_empty());
}

// ─── Maintenance items ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_item_with_frequency_computes_due_date() {
  let s = store().await;

  let before = Utc::now();
  let item = s.add_item(ItemKind::Pm, lube_pm(1, 1)).await.unwrap();

  let due = item.due_at.unwrap();
  assert_eq!(
    due.date_naive(),
    (before + Duration::days(7)).date_naive()
  );
  assert_eq!(item.frequency, Some(Frequency::SevenDays));
}

#[tokio::test]
async fn add_item_without_frequency_defaults_due_to_creation() {
  let s = store().await;

  let item = s
    .add_item(ItemKind::Breakdown, NewItem::new(1, 2, "belt snapped"))
    .await
    .unwrap();
  assert_eq!(item.due_at, Some(item.created_at));
}

#[tokio::test]
async fn add_item_honours_explicit_due_date() {
  let s = store().await;

  let due = Utc.with_ymd_and_hms(2030, 5, 1, 0, 0, 0).unwrap();
  let mut input = NewItem::new(1, 2, "quarterly inspection");
  input.due_at = Some(due);

  let item = s.add_item(ItemKind::WorkOrder, input).await.unwrap();
  assert_eq!(item.due_at, Some(due));
}

#[tokio::test]
async fn add_item_rejects_frequency_on_operator_check() {
  let s = store().await;

  let mut input = NewItem::new(1, 1, "walkround");
  input.frequency = Some(Frequency::OneDay);

  let err = s.add_item(ItemKind::OperatorCheck, input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(upkeep_core::Error::FrequencyNotAllowed(ItemKind::OperatorCheck))
  ));
}

#[tokio::test]
async fn add_item_duplicate_rejected_within_table_only() {
  let s = store().await;
  s.add_item(ItemKind::Pm, lube_pm(5, 1)).await.unwrap();

  let err = s.add_item(ItemKind::Pm, lube_pm(5, 1)).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::DuplicateItem { kind: ItemKind::Pm, item_id: 5 }
  ));

  // Same id in a different table is a different item.
  s.add_item(ItemKind::WorkOrder, NewItem::new(5, 1, "replace filter"))
    .await
    .unwrap();
}

#[tokio::test]
async fn item_round_trips_through_list() {
  let s = store().await;
  let added = s.add_item(ItemKind::Pm, lube_pm(9, 4)).await.unwrap();

  let listed = s.list_items(ItemKind::Pm, None).await.unwrap();
  assert_eq!(listed.len(), 1);

  let found = &listed[0].item;
  assert_eq!(found.item_id, 9);
  assert_eq!(found.asset_id, 4);
  assert_eq!(found.description, "lubricate main bearing");
  assert_eq!(found.frequency, Some(Frequency::SevenDays));
  assert_eq!(found.due_at, added.due_at);
}

#[tokio::test]
async fn list_items_classifies_against_as_of() {
  let s = store().await;

  let due = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
  let mut input = NewItem::new(1, 1, "check guards");
  input.due_at = Some(due);
  s.add_item(ItemKind::WorkOrder, input).await.unwrap();

  let on = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();

  let listed = s
    .list_items(ItemKind::WorkOrder, Some(on(2024, 6, 14)))
    .await
    .unwrap();
  assert_eq!(listed[0].status, Some(DueStatus::Upcoming));

  let listed = s
    .list_items(ItemKind::WorkOrder, Some(on(2024, 6, 15)))
    .await
    .unwrap();
  assert_eq!(listed[0].status, Some(DueStatus::DueToday));

  let listed = s
    .list_items(ItemKind::WorkOrder, Some(on(2024, 6, 16)))
    .await
    .unwrap();
  assert_eq!(listed[0].status, Some(DueStatus::Overdue));
}

#[tokio::test]
async fn list_items_is_idempotent() {
  let s = store().await;
  s.add_item(ItemKind::Pm, lube_pm(1, 1)).await.unwrap();
  s.add_item(ItemKind::Pm, lube_pm(2, 1)).await.unwrap();

  let as_of = Utc::now();
  let first = s.list_items(ItemKind::Pm, Some(as_of)).await.unwrap();
  let second = s.list_items(ItemKind::Pm, Some(as_of)).await.unwrap();

  assert_eq!(first.len(), second.len());
  for (a, b) in first.iter().zip(&second) {
    assert_eq!(a.item.item_id, b.item.item_id);
    assert_eq!(a.item.due_at, b.item.due_at);
    assert_eq!(a.status, b.status);
  }
}

#[tokio::test]
async fn delete_item_missing_is_noop() {
  let s = store().await;
  s.add_item(ItemKind::Pm, lube_pm(1, 1)).await.unwrap();

  assert!(!s.delete_item(ItemKind::Pm, 999).await.unwrap());
  assert_eq!(s.list_items(ItemKind::Pm, None).await.unwrap().len(), 1);

  assert!(s.delete_item(ItemKind::Pm, 1).await.unwrap());
  assert!(s.list_items(ItemKind::Pm, None).await.unwrap().is_empty());
}

// ─── Completion ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn complete_moves_item_to_history_exactly_once() {
  let s = store().await;
  s.add_item(ItemKind::Pm, lube_pm(5, 2)).await.unwrap();

  let entry = s.complete_item(ItemKind::Pm, 5).await.unwrap().unwrap();
  assert_eq!(entry.kind, ItemKind::Pm);
  assert_eq!(entry.item_id, 5);
  assert_eq!(entry.asset_id, 2);
  assert_eq!(entry.description, "lubricate main bearing");

  // Gone from the active table.
  assert!(s.get_item(ItemKind::Pm, 5).await.unwrap().is_none());

  // Present exactly once in history.
  let history = s.list_history().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].entry_id, entry.entry_id);
}

#[tokio::test]
async fn complete_missing_item_is_noop() {
  let s = store().await;

  let result = s.complete_item(ItemKind::WorkOrder, 404).await.unwrap();
  assert!(result.is_none());
  assert!(s.list_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn complete_rejects_non_archivable_kinds() {
  let s = store().await;
  s.add_item(ItemKind::Breakdown, NewItem::new(1, 1, "belt snapped"))
    .await
    .unwrap();

  let err = s.complete_item(ItemKind::Breakdown, 1).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(upkeep_core::Error::NotArchivable(ItemKind::Breakdown))
  ));

  // The item stays active.
  assert!(s.get_item(ItemKind::Breakdown, 1).await.unwrap().is_some());
}

#[tokio::test]
async fn history_is_most_recent_first() {
  let s = store().await;
  s.add_item(ItemKind::Pm, lube_pm(1, 1)).await.unwrap();
  s.add_item(ItemKind::WorkOrder, NewItem::new(2, 1, "replace filter"))
    .await
    .unwrap();

  let first = s.complete_item(ItemKind::Pm, 1).await.unwrap().unwrap();
  let second = s
    .complete_item(ItemKind::WorkOrder, 2)
    .await
    .unwrap()
    .unwrap();

  let history = s.list_history().await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].entry_id, second.entry_id);
  assert_eq!(history[0].kind, ItemKind::WorkOrder);
  assert_eq!(history[1].entry_id, first.entry_id);
}
