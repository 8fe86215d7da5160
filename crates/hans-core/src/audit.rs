//! Audit bookkeeping shared by every stored entity.
//!
//! Timestamps and actor references are maintained by the store's write path,
//! not by framework hooks: `created_*` is set on first save, `updated_*`
//! only when a record that already existed actually changed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated administrative user responsible for a write.
///
/// Supplied by the upstream identity provider; this crate treats it as an
/// opaque reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(pub String);

impl fmt::Display for Actor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Created/updated timestamps and actor references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub created_by: Option<Actor>,
  pub updated_by: Option<Actor>,
}

impl Audit {
  /// The audit block for a freshly created record.
  pub fn new_record(now: DateTime<Utc>, actor: Option<Actor>) -> Self {
    Self {
      created_at: now,
      updated_at: now,
      created_by: actor,
      updated_by: None,
    }
  }
}
