//! Handler for the `/dashboard` endpoint — the aggregate overview.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use upkeep_core::{
  item::{ItemKind, ScheduledItem},
  store::MaintenanceStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
  /// Reference instant for due-status classification. Defaults to now.
  pub as_of: Option<DateTime<Utc>>,
}

/// Every active list plus the asset count, in one response.
#[derive(Debug, Serialize)]
pub struct Dashboard {
  pub asset_count:     usize,
  pub pms:             Vec<ScheduledItem>,
  pub work_orders:     Vec<ScheduledItem>,
  pub operator_checks: Vec<ScheduledItem>,
  pub breakdowns:      Vec<ScheduledItem>,
}

/// `GET /dashboard[?as_of=...]`
pub async fn overview<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<OverviewParams>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Pin the classification instant so all four lists agree on "today".
  let as_of = Some(params.as_of.unwrap_or_else(Utc::now));

  let assets = store.list_assets().await.map_err(ApiError::store)?;
  let pms = store
    .list_items(ItemKind::Pm, as_of)
    .await
    .map_err(ApiError::store)?;
  let work_orders = store
    .list_items(ItemKind::WorkOrder, as_of)
    .await
    .map_err(ApiError::store)?;
  let operator_checks = store
    .list_items(ItemKind::OperatorCheck, as_of)
    .await
    .map_err(ApiError::store)?;
  let breakdowns = store
    .list_items(ItemKind::Breakdown, as_of)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(Dashboard {
    asset_count: assets.len(),
    pms,
    work_orders,
    operator_checks,
    breakdowns,
  }))
}
