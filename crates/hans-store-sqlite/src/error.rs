//! Error type for `hans-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] hans_core::Error),

  /// Any SQLite-level failure, including uniqueness and foreign-key
  /// constraint violations. Integrity violations are deliberately not
  /// translated into their own variants; they surface to administrative
  /// callers as generic store faults.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
