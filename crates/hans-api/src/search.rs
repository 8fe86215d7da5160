//! The `care_provider_search` operation.
//!
//! `POST /CareProvider/_search` with a form-encoded
//! `_careRecipientPseudoId` parameter resolves the care provider location
//! which owns a recipient with that pseudonym and returns its public contact
//! projection. The operation deliberately accepts only POST so the
//! pseudonym never appears in URLs, access logs, or caches.
//!
//! Failure shape (uniform across all three cases):
//! `{ "issue": [{ "severity": "error", "code": ..., "diagnostics": ... }] }`
//! with codes `required` (400), `not-found` (404), and `not-allowed` (405).

use axum::{
  Form, Json,
  extract::{State, rejection::FormRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use hans_core::store::DirectoryStore;
use serde::Deserialize;

use crate::{
  AppState,
  error::ApiError,
  fhir::{ContactRecord, failure_response},
};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
  #[serde(rename = "_careRecipientPseudoId")]
  pub care_recipient_pseudo_id: Option<String>,
}

/// `POST /CareProvider/_search`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Response, ApiError>
where
  S: DirectoryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // An unparsable body and an absent parameter report the same way: the
  // required search parameter was not supplied.
  let pseudonym = match form.ok().and_then(|Form(f)| f.care_recipient_pseudo_id) {
    Some(p) => p,
    None => {
      return Ok(failure_response(
        StatusCode::BAD_REQUEST,
        "required",
        "Required search parameter was missing: _careRecipientPseudoId",
      ));
    }
  };

  let location = state
    .store
    .find_location_by_pseudonym(&pseudonym)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // "No such recipient" and "no such provider" are indistinguishable on
  // purpose; anything else would hand an identifier-guessing oracle to the
  // caller.
  match location {
    Some(location) => {
      Ok(Json(ContactRecord::for_location(&location)).into_response())
    }
    None => Ok(failure_response(
      StatusCode::NOT_FOUND,
      "not-found",
      "No subscription was found on the system for the given pseudonymous identifier",
    )),
  }
}

/// Fallback for every non-POST method on the search route.
pub async fn not_allowed() -> Response {
  failure_response(
    StatusCode::METHOD_NOT_ALLOWED,
    "not-allowed",
    "Method not allowed - _search only supports POST",
  )
}
