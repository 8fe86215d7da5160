//! Care provider location — a registered branch authorised to receive
//! notifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::Audit;

/// A care provider branch, e.g. "Helping Hands Wantage".
///
/// Always owned by exactly one [`RegisteredManager`]; the store rejects an
/// insert without one and cascade-deletes the location when the manager is
/// deleted.
///
/// [`RegisteredManager`]: crate::manager::RegisteredManager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareProviderLocation {
  pub location_id: Uuid,
  pub name:        String,
  /// Unique; must belong to the approved email domain. This is the contact
  /// point exposed by the pseudonym lookup.
  pub email:       String,
  /// NHS Organisation Data Service code, e.g. `VNJNK`. Unique.
  pub ods_code:    String,
  /// CQC location identifier, e.g. `1-11086090064`. Unique.
  pub cqc_location_id: String,
  /// The owning registered manager.
  pub manager_id:  Uuid,
  #[serde(flatten)]
  pub audit:       Audit,
}

/// Input to [`crate::store::DirectoryStore::create_location`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCareProviderLocation {
  pub name:        String,
  pub email:       String,
  pub ods_code:    String,
  pub cqc_location_id: String,
  pub manager_id:  Uuid,
}

/// Full-replacement update for a care provider location.
#[derive(Debug, Clone, Deserialize)]
pub struct CareProviderLocationUpdate {
  pub name:        String,
  pub email:       String,
  pub ods_code:    String,
  pub cqc_location_id: String,
  pub manager_id:  Uuid,
}
