//! Completed-history entries.
//!
//! The history table is strictly append-only. An entry is written in the same
//! transaction that deletes the source item, so an item is never in both
//! places and never in neither.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::ItemKind;

/// A PM or work order that has been marked complete and archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedEntry {
  /// Auto-incrementing, assigned by the store.
  pub entry_id:     i64,
  /// Always [`ItemKind::Pm`] or [`ItemKind::WorkOrder`].
  pub kind:         ItemKind,
  pub item_id:      i64,
  pub asset_id:     i64,
  pub description:  String,
  pub completed_at: DateTime<Utc>,
}
