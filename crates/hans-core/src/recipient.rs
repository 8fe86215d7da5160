//! Care recipient — a pseudonymised subscription entity.
//!
//! The recipient's real-world identifier (an NHS number) is never persisted.
//! It appears only on the input structs, is consumed by the hasher during
//! the write, and the resulting [`Pseudonym`] is the sole durable
//! representation. The stored type below has no plaintext field at all.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{audit::Audit, pseudonym::Pseudonym};

/// Somebody receiving care from a provider location, for whom a HANS
/// subscription has been made.
///
/// Cascade-deleted when the owning location is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareRecipient {
  pub recipient_id: Uuid,
  /// The owning care provider location.
  pub location_id:  Uuid,
  /// One-way hash of the recipient's NHS number. Unique — the pseudonym
  /// lookup relies on a single-result match.
  pub nhs_number_hash: Pseudonym,
  /// Identifier of the subscription made on the recipient's behalf. Unique;
  /// assigned at enrolment and never changed.
  pub subscription_id: String,
  /// The care provider's own reference for the recipient, e.g.
  /// `WANT45320482`. Unique.
  pub provider_reference_id: String,
  #[serde(flatten)]
  pub audit:        Audit,
}

/// Input to [`crate::store::DirectoryStore::create_recipient`].
///
/// `nhs_number` is the transient plaintext identifier; it exists only for
/// the duration of the write.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCareRecipient {
  pub location_id:  Uuid,
  pub nhs_number:   String,
  pub subscription_id: String,
  pub provider_reference_id: String,
}

/// Update for a care recipient. Supplying `nhs_number` re-hashes it;
/// omitting it leaves the stored pseudonym untouched. `subscription_id` is
/// not updatable.
#[derive(Debug, Clone, Deserialize)]
pub struct CareRecipientUpdate {
  pub location_id:  Uuid,
  pub nhs_number:   Option<String>,
  pub provider_reference_id: String,
}
