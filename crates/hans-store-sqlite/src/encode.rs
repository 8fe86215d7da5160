//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Actor references are stored as bare text.

use chrono::{DateTime, Utc};
use hans_core::{
  audit::{Actor, Audit},
  location::CareProviderLocation,
  manager::RegisteredManager,
  pseudonym::Pseudonym,
  recipient::CareRecipient,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Audit columns ───────────────────────────────────────────────────────────

/// The four audit columns every table carries, as read from a row.
pub struct RawAudit {
  pub created_at: String,
  pub updated_at: String,
  pub created_by: Option<String>,
  pub updated_by: Option<String>,
}

impl RawAudit {
  pub fn into_audit(self) -> Result<Audit> {
    Ok(Audit {
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      created_by: self.created_by.map(Actor),
      updated_by: self.updated_by.map(Actor),
    })
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `registered_managers` row.
pub struct RawManager {
  pub manager_id:  String,
  pub given_name:  String,
  pub family_name: String,
  pub email:       String,
  pub cqc_registered_manager_id: String,
  pub audit:       RawAudit,
}

impl RawManager {
  pub fn into_manager(self) -> Result<RegisteredManager> {
    Ok(RegisteredManager {
      manager_id:  decode_uuid(&self.manager_id)?,
      given_name:  self.given_name,
      family_name: self.family_name,
      email:       self.email,
      cqc_registered_manager_id: self.cqc_registered_manager_id,
      audit:       self.audit.into_audit()?,
    })
  }
}

/// Raw strings read directly from a `care_provider_locations` row.
pub struct RawLocation {
  pub location_id: String,
  pub name:        String,
  pub email:       String,
  pub ods_code:    String,
  pub cqc_location_id: String,
  pub manager_id:  String,
  pub audit:       RawAudit,
}

impl RawLocation {
  pub fn into_location(self) -> Result<CareProviderLocation> {
    Ok(CareProviderLocation {
      location_id: decode_uuid(&self.location_id)?,
      name:        self.name,
      email:       self.email,
      ods_code:    self.ods_code,
      cqc_location_id: self.cqc_location_id,
      manager_id:  decode_uuid(&self.manager_id)?,
      audit:       self.audit.into_audit()?,
    })
  }
}

/// Raw strings read directly from a `care_recipients` row.
pub struct RawRecipient {
  pub recipient_id: String,
  pub location_id:  String,
  pub nhs_number_hash: String,
  pub subscription_id: String,
  pub provider_reference_id: String,
  pub audit:        RawAudit,
}

impl RawRecipient {
  pub fn into_recipient(self) -> Result<CareRecipient> {
    Ok(CareRecipient {
      recipient_id: decode_uuid(&self.recipient_id)?,
      location_id:  decode_uuid(&self.location_id)?,
      nhs_number_hash: Pseudonym::from_stored(self.nhs_number_hash),
      subscription_id: self.subscription_id,
      provider_reference_id: self.provider_reference_id,
      audit:        self.audit.into_audit()?,
    })
  }
}
