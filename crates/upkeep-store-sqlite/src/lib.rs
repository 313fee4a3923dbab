//! SQLite backend for the Upkeep maintenance tracker.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Schema setup is an explicit versioned
//! migration gated on `PRAGMA user_version`, run once at open.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
