//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Item kinds and recurrence
//! frequencies are stored as their label strings. Ids are plain INTEGER
//! columns and need no help.

use chrono::{DateTime, Utc};
use upkeep_core::{
  asset::Asset,
  history::CompletedEntry,
  item::{ItemKind, MaintenanceItem},
  schedule::Frequency,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ItemKind ────────────────────────────────────────────────────────────────

/// The table an item kind's active rows live in.
pub fn item_table(kind: ItemKind) -> &'static str {
  match kind {
    ItemKind::Pm => "pms",
    ItemKind::WorkOrder => "work_orders",
    ItemKind::OperatorCheck => "operator_checks",
    ItemKind::Breakdown => "breakdowns",
  }
}

pub fn decode_item_kind(s: &str) -> Result<ItemKind> {
  Ok(ItemKind::parse(s)?)
}

// ─── Frequency ───────────────────────────────────────────────────────────────

/// A label that no longer parses decodes as "no recurrence" rather than
/// failing the whole row.
pub fn decode_frequency(s: &str) -> Option<Frequency> { Frequency::parse(s) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `assets` row.
pub struct RawAsset {
  pub asset_id:   i64,
  pub name:       String,
  pub kind:       String,
  pub location:   String,
  pub created_at: String,
}

impl RawAsset {
  pub fn into_asset(self) -> Result<Asset> {
    Ok(Asset {
      asset_id:   self.asset_id,
      name:       self.name,
      kind:       self.kind,
      location:   self.location,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an item-table row.
pub struct RawItem {
  pub item_id:     i64,
  pub asset_id:    i64,
  pub description: String,
  pub frequency:   Option<String>,
  pub due_at:      Option<String>,
  pub created_at:  String,
}

impl RawItem {
  pub fn into_item(self) -> Result<MaintenanceItem> {
    Ok(MaintenanceItem {
      item_id:     self.item_id,
      asset_id:    self.asset_id,
      description: self.description,
      frequency:   self.frequency.as_deref().and_then(decode_frequency),
      due_at:      self.due_at.as_deref().map(decode_dt).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `completed_history` row.
pub struct RawEntry {
  pub entry_id:     i64,
  pub kind:         String,
  pub item_id:      i64,
  pub asset_id:     i64,
  pub description:  String,
  pub completed_at: String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<CompletedEntry> {
    Ok(CompletedEntry {
      entry_id:     self.entry_id,
      kind:         decode_item_kind(&self.kind)?,
      item_id:      self.item_id,
      asset_id:     self.asset_id,
      description:  self.description,
      completed_at: decode_dt(&self.completed_at)?,
    })
  }
}
