//! HTTP layer for the HANS management interface.
//!
//! Exposes an axum [`Router`] backed by any
//! [`hans_core::store::DirectoryStore`]: JSON CRUD endpoints for registered
//! managers, care provider locations, and care recipients, plus the
//! FHIR-flavoured `POST /CareProvider/_search` pseudonym lookup.
//!
//! Authentication is the upstream identity provider's responsibility; the
//! authenticated administrative actor arrives in the `x-authenticated-user`
//! header and is stamped into audit fields by the store.

pub mod error;
pub mod fhir;
pub mod locations;
pub mod managers;
pub mod recipients;
pub mod search;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::HeaderMap,
  routing::{get, post},
};
use hans_core::{audit::Actor, store::DirectoryStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised once at startup from
/// `config.toml` and `HANS_*` environment variables. Immutable; carried in
/// [`AppState`], never read as ambient global state.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
  /// The single email domain registered manager and location addresses must
  /// belong to.
  #[serde(default = "default_email_domain")]
  pub approved_email_domain: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }
fn default_db_path() -> PathBuf { PathBuf::from("hans.db") }
fn default_email_domain() -> String { "nhs.net".to_string() }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    default_host(),
      port:    default_port(),
      db_path: default_db_path(),
      approved_email_domain: default_email_domain(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: DirectoryStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

/// The authenticated administrative actor, as injected by the upstream
/// identity provider. Absent header means an unauthenticated context — no
/// actor stamp.
pub(crate) fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
  headers
    .get("x-authenticated-user")
    .and_then(|v| v.to_str().ok())
    .map(|s| Actor(s.to_owned()))
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full axum [`Router`] for the management interface.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DirectoryStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Registered managers
    .route(
      "/managers",
      get(managers::list::<S>).post(managers::create::<S>),
    )
    .route(
      "/managers/{id}",
      get(managers::get_one::<S>)
        .put(managers::update_one::<S>)
        .delete(managers::delete_one::<S>),
    )
    // Care provider locations
    .route(
      "/locations",
      get(locations::list::<S>).post(locations::create::<S>),
    )
    .route(
      "/locations/{id}",
      get(locations::get_one::<S>)
        .put(locations::update_one::<S>)
        .delete(locations::delete_one::<S>),
    )
    // Care recipients
    .route(
      "/recipients",
      get(recipients::list::<S>).post(recipients::create::<S>),
    )
    .route(
      "/recipients/{id}",
      get(recipients::get_one::<S>)
        .put(recipients::update_one::<S>)
        .delete(recipients::delete_one::<S>),
    )
    // Pseudonym search. Only POST is served; the fallback answers every
    // other method with the not-allowed outcome envelope.
    .route(
      "/CareProvider/_search",
      post(search::handler::<S>).fallback(search::not_allowed),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
