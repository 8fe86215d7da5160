//! Handlers for `/managers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/managers` | All registered managers |
//! | `POST`   | `/managers` | Email must pass the approved-domain check |
//! | `GET`    | `/managers/:id` | 404 if not found |
//! | `PUT`    | `/managers/:id` | Full replacement; stamps `updated_by` on change |
//! | `DELETE` | `/managers/:id` | Cascades to owned locations and recipients |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use hans_core::{
  manager::{NewRegisteredManager, RegisteredManager, RegisteredManagerUpdate},
  store::DirectoryStore,
  validate::validated_email_domain,
};
use uuid::Uuid;

use crate::{AppState, actor_from_headers, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /managers`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<RegisteredManager>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let managers = state
    .store
    .list_managers()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(managers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /managers`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewRegisteredManager>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let email =
    validated_email_domain(&body.email, &state.config.approved_email_domain)?
      .to_owned();
  let input = NewRegisteredManager { email, ..body };

  let manager = state
    .store
    .create_manager(input, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(manager)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /managers/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RegisteredManager>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let manager = state
    .store
    .get_manager(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("manager {id} not found")))?;
  Ok(Json(manager))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /managers/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
  Json(body): Json<RegisteredManagerUpdate>,
) -> Result<Json<RegisteredManager>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let email =
    validated_email_domain(&body.email, &state.config.approved_email_domain)?
      .to_owned();
  let input = RegisteredManagerUpdate { email, ..body };

  let manager = state
    .store
    .update_manager(id, input, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("manager {id} not found")))?;
  Ok(Json(manager))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /managers/:id`
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
    .delete_manager(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("manager {id} not found")))
  }
}
