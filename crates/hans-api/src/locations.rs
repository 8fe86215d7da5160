//! Handlers for `/locations` endpoints.
//!
//! Creating a location requires an existing registered manager; the store's
//! foreign key rejects the write otherwise. Deleting a location cascades to
//! its care recipients.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use hans_core::{
  location::{
    CareProviderLocation, CareProviderLocationUpdate, NewCareProviderLocation,
  },
  store::DirectoryStore,
  validate::validated_email_domain,
};
use uuid::Uuid;

use crate::{AppState, actor_from_headers, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /locations`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CareProviderLocation>>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let locations = state
    .store
    .list_locations()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(locations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /locations`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewCareProviderLocation>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let email =
    validated_email_domain(&body.email, &state.config.approved_email_domain)?
      .to_owned();
  let input = NewCareProviderLocation { email, ..body };

  let location = state
    .store
    .create_location(input, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(location)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /locations/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CareProviderLocation>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let location = state
    .store
    .get_location(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))?;
  Ok(Json(location))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /locations/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
  Json(body): Json<CareProviderLocationUpdate>,
) -> Result<Json<CareProviderLocation>, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let email =
    validated_email_domain(&body.email, &state.config.approved_email_domain)?
      .to_owned();
  let input = CareProviderLocationUpdate { email, ..body };

  let location = state
    .store
    .update_location(id, input, actor_from_headers(&headers))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("location {id} not found")))?;
  Ok(Json(location))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /locations/:id`
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
    .delete_location(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("location {id} not found")))
  }
}
