//! Registered manager — the CQC-accredited individual accountable for one or
//! more care provider locations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::Audit;

/// A Care Quality Commission (CQC) registered manager.
///
/// Deleting a manager cascades to every location they own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredManager {
  pub manager_id:  Uuid,
  pub given_name:  String,
  pub family_name: String,
  /// Unique; must belong to the approved email domain.
  pub email:       String,
  /// CQC accreditation reference, e.g. `1-XXXXXXXX`. Free text, required.
  pub cqc_registered_manager_id: String,
  #[serde(flatten)]
  pub audit:       Audit,
}

/// Input to [`crate::store::DirectoryStore::create_manager`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewRegisteredManager {
  pub given_name:  String,
  pub family_name: String,
  pub email:       String,
  pub cqc_registered_manager_id: String,
}

/// Full-replacement update for a registered manager.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredManagerUpdate {
  pub given_name:  String,
  pub family_name: String,
  pub email:       String,
  pub cqc_registered_manager_id: String,
}
