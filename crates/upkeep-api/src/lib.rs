//! JSON REST API for Upkeep.
//!
//! Exposes an axum [`Router`] backed by any
//! [`upkeep_core::store::MaintenanceStore`]. Transport concerns (TLS,
//! request logging) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = upkeep_api::api_router(store.clone());
//! ```

pub mod assets;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod items;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use upkeep_core::store::MaintenanceStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MaintenanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Assets
    .route("/assets", get(assets::list::<S>).post(assets::create::<S>))
    .route(
      "/assets/{id}",
      get(assets::get_one::<S>).delete(assets::delete_one::<S>),
    )
    // Maintenance items, one table per kind
    .route("/items/{kind}", get(items::list::<S>).post(items::create::<S>))
    .route(
      "/items/{kind}/{id}",
      get(items::get_one::<S>).delete(items::delete_one::<S>),
    )
    .route("/items/{kind}/{id}/complete", post(items::complete_one::<S>))
    // Completed history
    .route("/history", get(history::list::<S>))
    // Aggregate view
    .route("/dashboard", get(dashboard::overview::<S>))
    .with_state(store)
}
