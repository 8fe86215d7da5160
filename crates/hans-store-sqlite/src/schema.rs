//! SQL schema for the HANS SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.
//!
//! Integrity invariants are enforced here rather than in application code:
//! every unique field carries a UNIQUE constraint, and both ownership edges
//! (manager -> location, location -> recipient) are NOT NULL foreign keys
//! with ON DELETE CASCADE.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS registered_managers (
    manager_id                TEXT PRIMARY KEY,
    given_name                TEXT NOT NULL,
    family_name               TEXT NOT NULL,
    email                     TEXT NOT NULL UNIQUE,
    cqc_registered_manager_id TEXT NOT NULL,   -- e.g. '1-XXXXXXXX'
    created_at                TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at                TEXT NOT NULL,
    created_by                TEXT,
    updated_by                TEXT
);

CREATE TABLE IF NOT EXISTS care_provider_locations (
    location_id     TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    ods_code        TEXT NOT NULL UNIQUE,      -- e.g. 'VNJNK'
    cqc_location_id TEXT NOT NULL UNIQUE,      -- e.g. '1-11086090064'
    manager_id      TEXT NOT NULL
                    REFERENCES registered_managers(manager_id)
                    ON DELETE CASCADE,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    created_by      TEXT,
    updated_by      TEXT
);

-- The plaintext NHS number never reaches this table; only its hash does.
CREATE TABLE IF NOT EXISTS care_recipients (
    recipient_id          TEXT PRIMARY KEY,
    location_id           TEXT NOT NULL
                          REFERENCES care_provider_locations(location_id)
                          ON DELETE CASCADE,
    nhs_number_hash       TEXT NOT NULL UNIQUE, -- lowercase hex SHA3-256
    subscription_id       TEXT NOT NULL UNIQUE,
    provider_reference_id TEXT NOT NULL UNIQUE, -- e.g. 'WANT45320482'
    created_at            TEXT NOT NULL,
    updated_at            TEXT NOT NULL,
    created_by            TEXT,
    updated_by            TEXT
);

CREATE INDEX IF NOT EXISTS locations_manager_idx  ON care_provider_locations(manager_id);
CREATE INDEX IF NOT EXISTS recipients_location_idx ON care_recipients(location_id);

PRAGMA user_version = 1;
";
