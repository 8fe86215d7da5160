//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! These are the errors of the administrative CRUD surface. The pseudonym
//! search endpoint responds with FHIR [`OperationOutcome`] envelopes instead
//! (see [`crate::fhir`]).
//!
//! [`OperationOutcome`]: crate::fhir::OperationOutcome

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an admin API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// A field-level business-rule rejection (bad email domain, empty
  /// identifier). Never reaches the store.
  #[error(transparent)]
  Validation(#[from] hans_core::Error),

  /// Store failure, including uniqueness and foreign-key violations.
  /// Presented generically; no translation and no retries.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
