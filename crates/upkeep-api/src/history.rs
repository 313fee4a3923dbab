//! Handler for the `/history` endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use upkeep_core::{history::CompletedEntry, store::MaintenanceStore};

use crate::error::ApiError;

/// `GET /history` — all completed entries, most recently completed first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CompletedEntry>>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = store.list_history().await.map_err(ApiError::store)?;
  Ok(Json(entries))
}
