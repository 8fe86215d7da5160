//! Pseudonym — the one-way hash of a care recipient's NHS number.
//!
//! The raw identifier is hashed once at write time and discarded; the
//! pseudonym is the only durable representation, and lookups compare
//! pseudonyms for equality without ever seeing the original value.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::{Error, Result};

/// A lowercase hex SHA3-256 digest of an NHS number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pseudonym(String);

impl Pseudonym {
  /// Hash a raw identifier. Deterministic: the same input always produces
  /// the same pseudonym, across calls and across process restarts.
  ///
  /// An empty (or all-whitespace) identifier is refused — hashing it would
  /// make every "no identifier" record collide on the same digest.
  // TODO: migrate to scrypt once the subscription producer does the same.
  pub fn from_identifier(raw: &str) -> Result<Self> {
    if raw.trim().is_empty() {
      return Err(Error::EmptyIdentifier);
    }
    let digest = Sha3_256::digest(raw.as_bytes());
    Ok(Self(hex::encode(digest)))
  }

  /// Wrap a digest string read back from storage.
  pub fn from_stored(hex_digest: String) -> Self { Self(hex_digest) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Pseudonym {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
