//! Handlers for `/assets` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assets` | All assets, id order |
//! | `GET`    | `/assets/:id` | 404 if not found |
//! | `POST`   | `/assets` | Body: [`NewAsset`]; 400 invalid, 409 duplicate |
//! | `DELETE` | `/assets/:id` | 204 even if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use upkeep_core::{
  asset::{Asset, NewAsset},
  store::MaintenanceStore,
};

use crate::error::ApiError;

/// `GET /assets`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Asset>>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let assets = store.list_assets().await.map_err(ApiError::store)?;
  Ok(Json(assets))
}

/// `POST /assets`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAsset>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let existing = store
    .get_asset(body.asset_id)
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!(
      "asset {} already exists",
      body.asset_id
    )));
  }

  let asset = store.add_asset(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(asset)))
}

/// `GET /assets/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Asset>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let asset = store
    .get_asset(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("asset {id} not found")))?;
  Ok(Json(asset))
}

/// `DELETE /assets/:id` — idempotent; absence is not an error.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store.delete_asset(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
