//! Maintenance items — the rows users actually track.
//!
//! Four kinds share one shape and live in separate tables: preventive
//! maintenance tasks, work orders, operator checks, and breakdowns. Only the
//! first two recur and only the first two can be completed into history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  schedule::{DueStatus, Frequency},
};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Which table a maintenance item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
  Pm,
  WorkOrder,
  OperatorCheck,
  Breakdown,
}

impl ItemKind {
  pub const ALL: [ItemKind; 4] = [
    ItemKind::Pm,
    ItemKind::WorkOrder,
    ItemKind::OperatorCheck,
    ItemKind::Breakdown,
  ];

  /// The discriminant stored in the history table and used in URL paths.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pm => "pm",
      Self::WorkOrder => "work_order",
      Self::OperatorCheck => "operator_check",
      Self::Breakdown => "breakdown",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "pm" => Ok(Self::Pm),
      "work_order" => Ok(Self::WorkOrder),
      "operator_check" => Ok(Self::OperatorCheck),
      "breakdown" => Ok(Self::Breakdown),
      other => Err(Error::UnknownItemKind(other.to_string())),
    }
  }

  /// Scheduled kinds carry a recurrence frequency; checks and breakdowns are
  /// logged as they happen.
  pub fn recurs(&self) -> bool {
    matches!(self, Self::Pm | Self::WorkOrder)
  }

  /// Only scheduled kinds move into the completed-history table.
  pub fn archivable(&self) -> bool {
    matches!(self, Self::Pm | Self::WorkOrder)
  }
}

impl std::fmt::Display for ItemKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Item ────────────────────────────────────────────────────────────────────

/// One active maintenance task. `due_at`, once set, changes only when the
/// recurrence recomputes it; there is no edit operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItem {
  pub item_id:     i64,
  /// Soft reference; the referenced asset is not required to exist.
  pub asset_id:    i64,
  pub description: String,
  pub due_at:      Option<DateTime<Utc>>,
  pub frequency:   Option<Frequency>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// An item bundled with its due status, computed at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
  pub item:   MaintenanceItem,
  pub status: Option<DueStatus>,
}

// ─── NewItem ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::MaintenanceStore::add_item`].
/// `created_at` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
  pub item_id:     i64,
  pub asset_id:    i64,
  pub description: String,
  /// Recurring kinds only; drives the initial due date.
  #[serde(default)]
  pub frequency:   Option<Frequency>,
  /// Explicit due date for non-recurring items. Ignored when `frequency` is
  /// set.
  #[serde(default)]
  pub due_at:      Option<DateTime<Utc>>,
}

impl NewItem {
  /// Convenience constructor with no recurrence and no explicit due date.
  pub fn new(item_id: i64, asset_id: i64, description: impl Into<String>) -> Self {
    Self {
      item_id,
      asset_id,
      description: description.into(),
      frequency: None,
      due_at: None,
    }
  }

  /// Field-level validation against the target kind.
  pub fn validate(&self, kind: ItemKind) -> Result<()> {
    if self.item_id <= 0 {
      return Err(Error::InvalidId {
        field: "item_id",
        value: self.item_id,
      });
    }
    if self.asset_id <= 0 {
      return Err(Error::InvalidId {
        field: "asset_id",
        value: self.asset_id,
      });
    }
    if self.description.trim().is_empty() {
      return Err(Error::EmptyField("description"));
    }
    if self.frequency.is_some() && !kind.recurs() {
      return Err(Error::FrequencyNotAllowed(kind));
    }
    Ok(())
  }

  /// The due date the stored row gets: the recurrence projected from
  /// `created_at`, an explicit `due_at`, or `created_at` itself.
  pub fn resolve_due(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
    self
      .frequency
      .map(|f| f.next_due(created_at))
      .or(self.due_at)
      .unwrap_or(created_at)
  }
}
