//! Error type for `upkeep-store-sqlite`.

use thiserror::Error;
use upkeep_core::item::ItemKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] upkeep_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to add an asset whose id is already taken.
  #[error("asset {0} already exists")]
  DuplicateAsset(i64),

  /// Attempted to add an item whose id is already taken within its table.
  #[error("{kind} item {item_id} already exists")]
  DuplicateItem { kind: ItemKind, item_id: i64 },
}

impl Error {
  /// Whether this error is the caller's fault (bad input) rather than the
  /// store's. API layers map these to client-error statuses.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Core(_))
  }

  pub fn is_duplicate(&self) -> bool {
    matches!(self, Self::DuplicateAsset(_) | Self::DuplicateItem { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
