//! Asset — a piece of physical equipment that maintenance items hang off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A registered piece of equipment. `asset_id` is user-assigned, so creation
/// can fail on a duplicate; everything else is free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
  pub asset_id:   i64,
  pub name:       String,
  /// Equipment category, e.g. "press" or "extruder". Free text.
  pub kind:       String,
  pub location:   String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::MaintenanceStore::add_asset`].
/// `created_at` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
  pub asset_id: i64,
  pub name:     String,
  pub kind:     String,
  pub location: String,
}

impl NewAsset {
  /// Field-level validation; duplicate detection belongs to the store.
  pub fn validate(&self) -> Result<()> {
    if self.asset_id <= 0 {
      return Err(Error::InvalidId {
        field: "asset_id",
        value: self.asset_id,
      });
    }
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("name"));
    }
    Ok(())
  }
}
