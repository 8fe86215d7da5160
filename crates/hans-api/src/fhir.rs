//! Minimal FHIR-shaped payloads for the pseudonym search endpoint.
//!
//! Success responses carry a bare organisation contact projection; every
//! failure carries an `OperationOutcome` envelope. Only the fields the
//! operation actually exposes are modelled — no resource ids, no codes.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use hans_core::location::CareProviderLocation;
use serde::Serialize;

// ─── Success projection ──────────────────────────────────────────────────────

/// A work-context contact point (FHIR `ContactPoint`).
#[derive(Debug, Serialize)]
pub struct ContactPoint {
  pub system: String,
  pub value:  String,
  #[serde(rename = "use")]
  pub use_:   String,
}

/// The public contact record for a care provider location (FHIR
/// `Organization`, trimmed to name and telecom).
#[derive(Debug, Serialize)]
pub struct ContactRecord {
  pub name:    String,
  pub telecom: Vec<ContactPoint>,
}

impl ContactRecord {
  pub fn for_location(location: &CareProviderLocation) -> Self {
    Self {
      name:    location.name.clone(),
      telecom: vec![ContactPoint {
        system: "email".into(),
        value:  location.email.clone(),
        use_:   "work".into(),
      }],
    }
  }
}

// ─── Failure envelope ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OperationOutcomeIssue {
  pub severity:    String,
  pub code:        String,
  pub diagnostics: String,
}

/// The structured `{issue: [...]}` failure payload used uniformly across
/// search failure responses.
#[derive(Debug, Serialize)]
pub struct OperationOutcome {
  pub issue: Vec<OperationOutcomeIssue>,
}

impl OperationOutcome {
  pub fn error(code: &str, diagnostics: &str) -> Self {
    Self {
      issue: vec![OperationOutcomeIssue {
        severity:    "error".into(),
        code:        code.into(),
        diagnostics: diagnostics.into(),
      }],
    }
  }
}

/// Build a failure response carrying a single-issue outcome envelope.
pub fn failure_response(status: StatusCode, code: &str, diagnostics: &str) -> Response {
  (status, Json(OperationOutcome::error(code, diagnostics))).into_response()
}
