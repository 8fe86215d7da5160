//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use hans_core::{
  audit::{Actor, Audit},
  location::{CareProviderLocation, CareProviderLocationUpdate, NewCareProviderLocation},
  manager::{NewRegisteredManager, RegisteredManager, RegisteredManagerUpdate},
  pseudonym::Pseudonym,
  recipient::{CareRecipient, CareRecipientUpdate, NewCareRecipient},
  store::DirectoryStore,
};

use crate::{
  encode::{
    encode_dt, encode_uuid, RawAudit, RawLocation, RawManager, RawRecipient,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Row mapping ─────────────────────────────────────────────────────────────

const MANAGER_COLUMNS: &str =
  "manager_id, given_name, family_name, email, cqc_registered_manager_id,
   created_at, updated_at, created_by, updated_by";

const LOCATION_COLUMNS: &str =
  "location_id, name, email, ods_code, cqc_location_id, manager_id,
   created_at, updated_at, created_by, updated_by";

const RECIPIENT_COLUMNS: &str =
  "recipient_id, location_id, nhs_number_hash, subscription_id,
   provider_reference_id, created_at, updated_at, created_by, updated_by";

fn audit_from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<RawAudit> {
  Ok(RawAudit {
    created_at: row.get(offset)?,
    updated_at: row.get(offset + 1)?,
    created_by: row.get(offset + 2)?,
    updated_by: row.get(offset + 3)?,
  })
}

fn manager_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawManager> {
  Ok(RawManager {
    manager_id:  row.get(0)?,
    given_name:  row.get(1)?,
    family_name: row.get(2)?,
    email:       row.get(3)?,
    cqc_registered_manager_id: row.get(4)?,
    audit:       audit_from_row(row, 5)?,
  })
}

fn location_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawLocation> {
  Ok(RawLocation {
    location_id: row.get(0)?,
    name:        row.get(1)?,
    email:       row.get(2)?,
    ods_code:    row.get(3)?,
    cqc_location_id: row.get(4)?,
    manager_id:  row.get(5)?,
    audit:       audit_from_row(row, 6)?,
  })
}

fn recipient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecipient> {
  Ok(RawRecipient {
    recipient_id: row.get(0)?,
    location_id:  row.get(1)?,
    nhs_number_hash: row.get(2)?,
    subscription_id: row.get(3)?,
    provider_reference_id: row.get(4)?,
    audit:        audit_from_row(row, 5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A HANS record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Stamp the audit block of an existing record for an update.
  fn stamp_update(audit: &Audit, actor: Option<Actor>) -> Audit {
    Audit {
      created_at: audit.created_at,
      updated_at: Utc::now(),
      created_by: audit.created_by.clone(),
      updated_by: actor,
    }
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Registered managers ──────────────────────────────────────────────────

  async fn create_manager(
    &self,
    input: NewRegisteredManager,
    actor: Option<Actor>,
  ) -> Result<RegisteredManager> {
    let manager = RegisteredManager {
      manager_id:  Uuid::new_v4(),
      given_name:  input.given_name,
      family_name: input.family_name,
      email:       input.email,
      cqc_registered_manager_id: input.cqc_registered_manager_id,
      audit:       Audit::new_record(Utc::now(), actor),
    };

    let id_str     = encode_uuid(manager.manager_id);
    let given      = manager.given_name.clone();
    let family     = manager.family_name.clone();
    let email      = manager.email.clone();
    let cqc_id     = manager.cqc_registered_manager_id.clone();
    let created_at = encode_dt(manager.audit.created_at);
    let updated_at = encode_dt(manager.audit.updated_at);
    let created_by = manager.audit.created_by.clone().map(|a| a.0);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO registered_managers (
             manager_id, given_name, family_name, email,
             cqc_registered_manager_id,
             created_at, updated_at, created_by, updated_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL)",
          rusqlite::params![
            id_str, given, family, email, cqc_id, created_at, updated_at,
            created_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(manager)
  }

  async fn get_manager(&self, id: Uuid) -> Result<Option<RegisteredManager>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawManager> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {MANAGER_COLUMNS} FROM registered_managers
               WHERE manager_id = ?1"
            ),
            rusqlite::params![id_str],
            manager_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawManager::into_manager).transpose()
  }

  async fn list_managers(&self) -> Result<Vec<RegisteredManager>> {
    let raws: Vec<RawManager> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MANAGER_COLUMNS} FROM registered_managers
           ORDER BY family_name, given_name"
        ))?;
        let rows = stmt
          .query_map([], manager_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawManager::into_manager).collect()
  }

  async fn update_manager(
    &self,
    id: Uuid,
    input: RegisteredManagerUpdate,
    actor: Option<Actor>,
  ) -> Result<Option<RegisteredManager>> {
    let existing = match self.get_manager(id).await? {
      Some(m) => m,
      None    => return Ok(None),
    };

    let unchanged = existing.given_name == input.given_name
      && existing.family_name == input.family_name
      && existing.email == input.email
      && existing.cqc_registered_manager_id == input.cqc_registered_manager_id;
    if unchanged {
      return Ok(Some(existing));
    }

    let manager = RegisteredManager {
      manager_id:  existing.manager_id,
      given_name:  input.given_name,
      family_name: input.family_name,
      email:       input.email,
      cqc_registered_manager_id: input.cqc_registered_manager_id,
      audit:       Self::stamp_update(&existing.audit, actor),
    };

    let id_str     = encode_uuid(manager.manager_id);
    let given      = manager.given_name.clone();
    let family     = manager.family_name.clone();
    let email      = manager.email.clone();
    let cqc_id     = manager.cqc_registered_manager_id.clone();
    let updated_at = encode_dt(manager.audit.updated_at);
    let updated_by = manager.audit.updated_by.clone().map(|a| a.0);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE registered_managers SET
             given_name = ?2, family_name = ?3, email = ?4,
             cqc_registered_manager_id = ?5,
             updated_at = ?6, updated_by = ?7
           WHERE manager_id = ?1",
          rusqlite::params![
            id_str, given, family, email, cqc_id, updated_at, updated_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(manager))
  }

  async fn delete_manager(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM registered_managers WHERE manager_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Care provider locations ──────────────────────────────────────────────

  async fn create_location(
    &self,
    input: NewCareProviderLocation,
    actor: Option<Actor>,
  ) -> Result<CareProviderLocation> {
    let location = CareProviderLocation {
      location_id: Uuid::new_v4(),
      name:        input.name,
      email:       input.email,
      ods_code:    input.ods_code,
      cqc_location_id: input.cqc_location_id,
      manager_id:  input.manager_id,
      audit:       Audit::new_record(Utc::now(), actor),
    };

    let id_str     = encode_uuid(location.location_id);
    let name       = location.name.clone();
    let email      = location.email.clone();
    let ods_code   = location.ods_code.clone();
    let cqc_id     = location.cqc_location_id.clone();
    let manager_id = encode_uuid(location.manager_id);
    let created_at = encode_dt(location.audit.created_at);
    let updated_at = encode_dt(location.audit.updated_at);
    let created_by = location.audit.created_by.clone().map(|a| a.0);

    // The foreign key rejects this insert if the manager does not exist.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO care_provider_locations (
             location_id, name, email, ods_code, cqc_location_id, manager_id,
             created_at, updated_at, created_by, updated_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL)",
          rusqlite::params![
            id_str, name, email, ods_code, cqc_id, manager_id, created_at,
            updated_at, created_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(location)
  }

  async fn get_location(&self, id: Uuid) -> Result<Option<CareProviderLocation>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLocation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {LOCATION_COLUMNS} FROM care_provider_locations
               WHERE location_id = ?1"
            ),
            rusqlite::params![id_str],
            location_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawLocation::into_location).transpose()
  }

  async fn list_locations(&self) -> Result<Vec<CareProviderLocation>> {
    let raws: Vec<RawLocation> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LOCATION_COLUMNS} FROM care_provider_locations
           ORDER BY name"
        ))?;
        let rows = stmt
          .query_map([], location_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLocation::into_location).collect()
  }

  async fn update_location(
    &self,
    id: Uuid,
    input: CareProviderLocationUpdate,
    actor: Option<Actor>,
  ) -> Result<Option<CareProviderLocation>> {
    let existing = match self.get_location(id).await? {
      Some(l) => l,
      None    => return Ok(None),
    };

    let unchanged = existing.name == input.name
      && existing.email == input.email
      && existing.ods_code == input.ods_code
      && existing.cqc_location_id == input.cqc_location_id
      && existing.manager_id == input.manager_id;
    if unchanged {
      return Ok(Some(existing));
    }

    let location = CareProviderLocation {
      location_id: existing.location_id,
      name:        input.name,
      email:       input.email,
      ods_code:    input.ods_code,
      cqc_location_id: input.cqc_location_id,
      manager_id:  input.manager_id,
      audit:       Self::stamp_update(&existing.audit, actor),
    };

    let id_str     = encode_uuid(location.location_id);
    let name       = location.name.clone();
    let email      = location.email.clone();
    let ods_code   = location.ods_code.clone();
    let cqc_id     = location.cqc_location_id.clone();
    let manager_id = encode_uuid(location.manager_id);
    let updated_at = encode_dt(location.audit.updated_at);
    let updated_by = location.audit.updated_by.clone().map(|a| a.0);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE care_provider_locations SET
             name = ?2, email = ?3, ods_code = ?4, cqc_location_id = ?5,
             manager_id = ?6, updated_at = ?7, updated_by = ?8
           WHERE location_id = ?1",
          rusqlite::params![
            id_str, name, email, ods_code, cqc_id, manager_id, updated_at,
            updated_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(location))
  }

  async fn delete_location(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM care_provider_locations WHERE location_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Care recipients ──────────────────────────────────────────────────────

  async fn create_recipient(
    &self,
    input: NewCareRecipient,
    actor: Option<Actor>,
  ) -> Result<CareRecipient> {
    // The plaintext identifier is consumed here; only the hash survives.
    let nhs_number_hash = Pseudonym::from_identifier(&input.nhs_number)?;

    let recipient = CareRecipient {
      recipient_id: Uuid::new_v4(),
      location_id:  input.location_id,
      nhs_number_hash,
      subscription_id: input.subscription_id,
      provider_reference_id: input.provider_reference_id,
      audit:        Audit::new_record(Utc::now(), actor),
    };

    let id_str       = encode_uuid(recipient.recipient_id);
    let location_id  = encode_uuid(recipient.location_id);
    let hash         = recipient.nhs_number_hash.as_str().to_owned();
    let subscription = recipient.subscription_id.clone();
    let provider_ref = recipient.provider_reference_id.clone();
    let created_at   = encode_dt(recipient.audit.created_at);
    let updated_at   = encode_dt(recipient.audit.updated_at);
    let created_by   = recipient.audit.created_by.clone().map(|a| a.0);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO care_recipients (
             recipient_id, location_id, nhs_number_hash, subscription_id,
             provider_reference_id,
             created_at, updated_at, created_by, updated_by
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL)",
          rusqlite::params![
            id_str, location_id, hash, subscription, provider_ref,
            created_at, updated_at, created_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(recipient)
  }

  async fn get_recipient(&self, id: Uuid) -> Result<Option<CareRecipient>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecipient> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {RECIPIENT_COLUMNS} FROM care_recipients
               WHERE recipient_id = ?1"
            ),
            rusqlite::params![id_str],
            recipient_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecipient::into_recipient).transpose()
  }

  async fn list_recipients(&self) -> Result<Vec<CareRecipient>> {
    let raws: Vec<RawRecipient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECIPIENT_COLUMNS} FROM care_recipients
           ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map([], recipient_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecipient::into_recipient).collect()
  }

  async fn update_recipient(
    &self,
    id: Uuid,
    input: CareRecipientUpdate,
    actor: Option<Actor>,
  ) -> Result<Option<CareRecipient>> {
    let existing = match self.get_recipient(id).await? {
      Some(r) => r,
      None    => return Ok(None),
    };

    // Re-hash whenever a plaintext identifier was supplied.
    let nhs_number_hash = match input.nhs_number.as_deref() {
      Some(raw) => Pseudonym::from_identifier(raw)?,
      None      => existing.nhs_number_hash.clone(),
    };

    let unchanged = existing.location_id == input.location_id
      && existing.nhs_number_hash == nhs_number_hash
      && existing.provider_reference_id == input.provider_reference_id;
    if unchanged {
      return Ok(Some(existing));
    }

    let recipient = CareRecipient {
      recipient_id: existing.recipient_id,
      location_id:  input.location_id,
      nhs_number_hash,
      subscription_id: existing.subscription_id.clone(),
      provider_reference_id: input.provider_reference_id,
      audit:        Self::stamp_update(&existing.audit, actor),
    };

    let id_str       = encode_uuid(recipient.recipient_id);
    let location_id  = encode_uuid(recipient.location_id);
    let hash         = recipient.nhs_number_hash.as_str().to_owned();
    let provider_ref = recipient.provider_reference_id.clone();
    let updated_at   = encode_dt(recipient.audit.updated_at);
    let updated_by   = recipient.audit.updated_by.clone().map(|a| a.0);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE care_recipients SET
             location_id = ?2, nhs_number_hash = ?3,
             provider_reference_id = ?4, updated_at = ?5, updated_by = ?6
           WHERE recipient_id = ?1",
          rusqlite::params![
            id_str, location_id, hash, provider_ref, updated_at, updated_by,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(recipient))
  }

  async fn delete_recipient(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM care_recipients WHERE recipient_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Pseudonym lookup ─────────────────────────────────────────────────────

  async fn find_location_by_pseudonym(
    &self,
    pseudonym: &str,
  ) -> Result<Option<CareProviderLocation>> {
    let pseudonym = pseudonym.to_owned();

    let raw: Option<RawLocation> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT l.location_id, l.name, l.email, l.ods_code,
                    l.cqc_location_id, l.manager_id,
                    l.created_at, l.updated_at, l.created_by, l.updated_by
             FROM care_provider_locations l
             JOIN care_recipients r ON r.location_id = l.location_id
             WHERE r.nhs_number_hash = ?1",
            rusqlite::params![pseudonym],
            location_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawLocation::into_location).transpose()
  }
}
