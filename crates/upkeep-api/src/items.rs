//! Handlers for `/items/:kind` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/items/:kind` | Optional `?as_of=<rfc3339>`; statuses classified against it |
//! | `GET`    | `/items/:kind/:id` | Single item with status; 404 if not found |
//! | `POST`   | `/items/:kind` | Body: [`NewItem`]; 400 invalid, 409 duplicate |
//! | `DELETE` | `/items/:kind/:id` | 204 even if absent |
//! | `POST`   | `/items/:kind/:id/complete` | 200 history entry, 404 absent, 400 wrong kind |
//!
//! `:kind` is `pm`, `work_order`, `operator_check`, or `breakdown`; anything
//! else is a 400.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use upkeep_core::{
  history::CompletedEntry,
  item::{ItemKind, NewItem, ScheduledItem},
  schedule,
  store::MaintenanceStore,
};

use crate::error::ApiError;

fn parse_kind(raw: &str) -> Result<ItemKind, ApiError> {
  ItemKind::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Reference instant for due-status classification. Defaults to now.
  pub as_of: Option<DateTime<Utc>>,
}

/// `GET /items/:kind[?as_of=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(kind): Path<String>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ScheduledItem>>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kind = parse_kind(&kind)?;
  let items = store
    .list_items(kind, params.as_of)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(items))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /items/:kind/:id[?as_of=...]`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(String, i64)>,
  Query(params): Query<ListParams>,
) -> Result<Json<ScheduledItem>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kind = parse_kind(&kind)?;
  let item = store
    .get_item(kind, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{kind} item {id} not found")))?;

  let as_of = params.as_of.unwrap_or_else(Utc::now);
  let status = schedule::classify(item.due_at, as_of);
  Ok(Json(ScheduledItem { item, status }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /items/:kind`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(kind): Path<String>,
  Json(body): Json<NewItem>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kind = parse_kind(&kind)?;
  body
    .validate(kind)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let existing = store
    .get_item(kind, body.item_id)
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!(
      "{kind} item {} already exists",
      body.item_id
    )));
  }

  let item = store.add_item(kind, body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(item)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /items/:kind/:id` — idempotent; absence is not an error.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(String, i64)>,
) -> Result<StatusCode, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kind = parse_kind(&kind)?;
  store.delete_item(kind, id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Complete ─────────────────────────────────────────────────────────────────

/// `POST /items/:kind/:id/complete`
pub async fn complete_one<S>(
  State(store): State<Arc<S>>,
  Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<CompletedEntry>, ApiError>
where
  S: MaintenanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kind = parse_kind(&kind)?;
  if !kind.archivable() {
    return Err(ApiError::BadRequest(
      upkeep_core::Error::NotArchivable(kind).to_string(),
    ));
  }

  let entry = store
    .complete_item(kind, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{kind} item {id} not found")))?;
  Ok(Json(entry))
}
