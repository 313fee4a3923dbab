//! The `MaintenanceStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `upkeep-store-sqlite`).
//! Higher layers (`upkeep-api`, `upkeep-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  asset::{Asset, NewAsset},
  history::CompletedEntry,
  item::{ItemKind, MaintenanceItem, NewItem, ScheduledItem},
};

/// Abstraction over an Upkeep storage backend.
///
/// Every method is one atomic unit of work. Deletes and completions of absent
/// ids are no-ops, not errors; invalid input and duplicate ids are errors with
/// no partial write.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait MaintenanceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Assets ────────────────────────────────────────────────────────────

  /// Validate and persist a new asset. `created_at` is set by the store.
  /// Duplicate `asset_id` is an error.
  fn add_asset(
    &self,
    input: NewAsset,
  ) -> impl Future<Output = Result<Asset, Self::Error>> + Send + '_;

  /// Retrieve an asset by id. Returns `None` if not found.
  fn get_asset(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Asset>, Self::Error>> + Send + '_;

  /// List all assets in id order.
  fn list_assets(
    &self,
  ) -> impl Future<Output = Result<Vec<Asset>, Self::Error>> + Send + '_;

  /// Remove an asset. Absence is a no-op; returns whether a row was removed.
  /// Items referencing the asset are left in place (soft references).
  fn delete_asset(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Maintenance items ─────────────────────────────────────────────────

  /// Validate and persist a new item of `kind`. The due date is resolved by
  /// the store from the recurrence frequency (or explicit `due_at`, or the
  /// creation time). Duplicate `item_id` within the kind's table is an error.
  /// The referenced asset is NOT required to exist.
  fn add_item(
    &self,
    kind: ItemKind,
    input: NewItem,
  ) -> impl Future<Output = Result<MaintenanceItem, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_item(
    &self,
    kind: ItemKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<MaintenanceItem>, Self::Error>> + Send + '_;

  /// List all items of `kind` in id order, each with its due status
  /// classified against `as_of` (defaults to now).
  fn list_items(
    &self,
    kind: ItemKind,
    as_of: Option<DateTime<Utc>>,
  ) -> impl Future<Output = Result<Vec<ScheduledItem>, Self::Error>> + Send + '_;

  /// Remove an item. Absence is a no-op; returns whether a row was removed.
  fn delete_item(
    &self,
    kind: ItemKind,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Completion ────────────────────────────────────────────────────────

  /// Mark an item complete: delete it from its source table and append a
  /// history entry, in a single transaction. Returns `Ok(None)` if the item
  /// does not exist. Errors if `kind` is not archivable (operator checks and
  /// breakdowns never move to history).
  fn complete_item(
    &self,
    kind: ItemKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<CompletedEntry>, Self::Error>> + Send + '_;

  /// All history entries, most recently completed first.
  fn list_history(
    &self,
  ) -> impl Future<Output = Result<Vec<CompletedEntry>, Self::Error>> + Send + '_;
}
