//! Error types for `upkeep-core`.

use thiserror::Error;

use crate::item::ItemKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{field} must be a positive integer, got {value}")]
  InvalidId { field: &'static str, value: i64 },

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("{0} items do not take a recurrence frequency")]
  FrequencyNotAllowed(ItemKind),

  #[error("{0} items cannot be archived to history")]
  NotArchivable(ItemKind),

  #[error("unknown item kind: {0:?}")]
  UnknownItemKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
