//! Error types for `hans-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An email address was rejected by the approved-domain check. The message
  /// is surfaced to the administrative caller as a field-level error.
  #[error("{0}")]
  DomainRejected(String),

  /// A care recipient was submitted without a usable identifier. A hash of
  /// the "no value" sentinel would be indistinguishable from a real
  /// pseudonym, so the write is refused instead.
  #[error("care recipient identifier must not be empty")]
  EmptyIdentifier,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
