//! Handlers for `/recipients` endpoints.
//!
//! The request body carries the recipient's plaintext NHS number; it is
//! rejected here if empty, hashed inside the store's write path, and never
//! persisted or echoed back. Responses expose only the pseudonym.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use hans_core::{
  recipient::{CareRecipient, CareRecipientUpdate, NewCareRecipient},
  store::DirectoryStore,
};
use uuid::Uuid;

use crate::{AppState, actor_from_headers, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /recipients`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CareRecipient>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let recipients = state
    .store
    .list_recipients()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(recipients))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /recipients`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewCareRecipient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.nhs_number.trim().is_empty() {
    return Err(hans_core::Error::EmptyIdentifier.into());
  }

  let recipient = state
    .store
    .create_recipient(body, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(recipient)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /recipients/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CareRecipient>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let recipient = state
    .store
    .get_recipient(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("recipient {id} not found")))?;
  Ok(Json(recipient))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /recipients/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
  Json(body): Json<CareRecipientUpdate>,
) -> Result<Json<CareRecipient>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.nhs_number.as_deref().is_some_and(|n| n.trim().is_empty()) {
    return Err(hans_core::Error::EmptyIdentifier.into());
  }

  let recipient = state
    .store
    .update_recipient(id, body, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("recipient {id} not found")))?;
  Ok(Json(recipient))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /recipients/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_recipient(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("recipient {id} not found")))
  }
}
