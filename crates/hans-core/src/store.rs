//! The `DirectoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `hans-store-sqlite`).
//! The HTTP layer (`hans-api`) depends on this abstraction, not on any
//! concrete backend.
//!
//! Referential integrity and uniqueness are backend responsibilities:
//! implementations must enforce them atomically at the storage layer, so
//! concurrent administrative writes cannot both succeed in violating an
//! invariant. Update and delete operations on an unknown id report
//! `Ok(None)` / `Ok(false)` rather than an error, so callers can map them
//! to "not found" without inspecting backend error types.

use std::future::Future;

use uuid::Uuid;

use crate::{
  audit::Actor,
  location::{CareProviderLocation, CareProviderLocationUpdate, NewCareProviderLocation},
  manager::{NewRegisteredManager, RegisteredManager, RegisteredManagerUpdate},
  recipient::{CareRecipient, CareRecipientUpdate, NewCareRecipient},
};

/// Abstraction over the HANS record store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Registered managers ───────────────────────────────────────────────

  /// Create and persist a registered manager. `actor` is stamped into
  /// `created_by` when present.
  fn create_manager(
    &self,
    input: NewRegisteredManager,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<RegisteredManager, Self::Error>> + Send + '_;

  /// Retrieve a manager by id. Returns `None` if not found.
  fn get_manager(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<RegisteredManager>, Self::Error>> + Send + '_;

  fn list_managers(
    &self,
  ) -> impl Future<Output = Result<Vec<RegisteredManager>, Self::Error>> + Send + '_;

  /// Replace a manager's user-visible fields. `updated_by`/`updated_at` are
  /// stamped only if something actually changed.
  fn update_manager(
    &self,
    id: Uuid,
    input: RegisteredManagerUpdate,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<Option<RegisteredManager>, Self::Error>> + Send + '_;

  /// Delete a manager and, by cascade, every location (and recipient) they
  /// own. Returns `false` if the id was unknown.
  fn delete_manager(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Care provider locations ───────────────────────────────────────────

  /// Create and persist a location. Fails if `input.manager_id` does not
  /// reference an existing manager.
  fn create_location(
    &self,
    input: NewCareProviderLocation,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<CareProviderLocation, Self::Error>> + Send + '_;

  fn get_location(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CareProviderLocation>, Self::Error>> + Send + '_;

  fn list_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<CareProviderLocation>, Self::Error>> + Send + '_;

  fn update_location(
    &self,
    id: Uuid,
    input: CareProviderLocationUpdate,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<Option<CareProviderLocation>, Self::Error>> + Send + '_;

  /// Delete a location and, by cascade, its recipients. Returns `false` if
  /// the id was unknown.
  fn delete_location(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Care recipients ───────────────────────────────────────────────────

  /// Create and persist a care recipient. The plaintext `nhs_number` on the
  /// input is hashed and discarded; only the pseudonym is stored.
  fn create_recipient(
    &self,
    input: NewCareRecipient,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<CareRecipient, Self::Error>> + Send + '_;

  fn get_recipient(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CareRecipient>, Self::Error>> + Send + '_;

  fn list_recipients(
    &self,
  ) -> impl Future<Output = Result<Vec<CareRecipient>, Self::Error>> + Send + '_;

  /// Update a recipient. A supplied plaintext `nhs_number` is re-hashed on
  /// every save.
  fn update_recipient(
    &self,
    id: Uuid,
    input: CareRecipientUpdate,
    actor: Option<Actor>,
  ) -> impl Future<Output = Result<Option<CareRecipient>, Self::Error>> + Send + '_;

  fn delete_recipient(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Pseudonym lookup ──────────────────────────────────────────────────

  /// Find the care provider location owning a recipient whose pseudonym
  /// equals `pseudonym`. At most one row can match — the pseudonym column
  /// is unique at the storage layer.
  fn find_location_by_pseudonym<'a>(
    &'a self,
    pseudonym: &'a str,
  ) -> impl Future<Output = Result<Option<CareProviderLocation>, Self::Error>> + Send + 'a;
}
