//! Handlers for `/opinions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/opinions/` | All opinions |
//! | `POST`   | `/opinions/` | Body: `title`, `text` required; `source`, `added_by` optional; 201 |
//! | `GET`    | `/opinions/:id/` | 404 if not found |
//! | `PATCH`  | `/opinions/:id/` | Any subset of the body fields; 201 |
//! | `DELETE` | `/opinions/:id/` | 204, empty body |
//! | `GET`    | `/get-random-opinion/` | 404 if the store is empty |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use opinions_core::{Opinion, OpinionFields, store::OpinionStore};
use serde::Serialize;

use crate::error::ApiError;

/// `{"opinion": {...}}`
#[derive(Debug, Serialize)]
pub struct OpinionBody {
  pub opinion: Opinion,
}

/// `{"opinions": [...]}`
#[derive(Debug, Serialize)]
pub struct OpinionList {
  pub opinions: Vec<Opinion>,
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /opinions/:id/`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OpinionBody>, ApiError>
where
  S: OpinionStore,
{
  let Path(id) = id?;
  let opinion = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(OpinionBody { opinion }))
}

// ─── Random ───────────────────────────────────────────────────────────────────

/// `GET /get-random-opinion/`
pub async fn random<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<OpinionBody>, ApiError>
where
  S: OpinionStore,
{
  let opinion = store
    .pick_random()
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NoOpinions)?;
  Ok(Json(OpinionBody { opinion }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /opinions/:id/`
///
/// The text check runs before the existence check, so a colliding text is
/// reported even for an unknown id. Matching the opinion's own text is not a
/// collision.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<OpinionFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OpinionStore,
{
  let Path(id) = id?;
  let Json(fields) = body?;

  if let Some(text) = fields.text.as_deref()
    && let Some(existing) = store.find_by_text(text).await.map_err(ApiError::store)?
    && existing.id != id
  {
    return Err(ApiError::DuplicateText);
  }

  let opinion = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;

  let opinion = store
    .update(opinion, fields.into_patch())
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id, "opinion updated");
  Ok((StatusCode::CREATED, Json(OpinionBody { opinion })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /opinions/:id/`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: OpinionStore,
{
  let Path(id) = id?;

  store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;

  if !store.delete(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound);
  }

  tracing::info!(id, "opinion deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /opinions/`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<OpinionList>, ApiError>
where
  S: OpinionStore,
{
  let opinions = store.list_all().await.map_err(ApiError::store)?;
  Ok(Json(OpinionList { opinions }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /opinions/`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<OpinionFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OpinionStore,
{
  let Json(fields) = body?;
  let input = fields.into_new()?;

  if store
    .find_by_text(&input.text)
    .await
    .map_err(ApiError::store)?
    .is_some()
  {
    return Err(ApiError::DuplicateText);
  }

  let opinion = store.create(input).await.map_err(ApiError::store)?;

  tracing::info!(id = opinion.id, "opinion created");
  Ok((StatusCode::CREATED, Json(OpinionBody { opinion })))
}
