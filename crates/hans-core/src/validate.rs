//! Field-level business rules applied before persistence.

use crate::{Error, Result};

/// Accept `email` only if its domain segment exactly equals `domain`.
///
/// Returns the trimmed email unchanged on success. An exact match is
/// required, not a suffix match, so `x@evilnhs.net` never passes for
/// `nhs.net`. Strings without an `@` (or with an empty local part) are
/// rejected on the same path.
pub fn validated_email_domain<'a>(email: &'a str, domain: &str) -> Result<&'a str> {
  let trimmed = email.trim();
  match trimmed.rsplit_once('@') {
    Some((local, dom)) if !local.is_empty() && dom == domain => Ok(trimmed),
    _ => Err(Error::DomainRejected(format!(
      "Enter an {domain} email address"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_approved_domain() {
    assert_eq!(
      validated_email_domain("good-dr@nhs.net", "nhs.net").unwrap(),
      "good-dr@nhs.net"
    );
  }

  #[test]
  fn trims_surrounding_whitespace() {
    assert_eq!(
      validated_email_domain("  good-dr@nhs.net ", "nhs.net").unwrap(),
      "good-dr@nhs.net"
    );
  }

  #[test]
  fn rejects_other_domains() {
    let err = validated_email_domain("bad-man@invalid-domain.evil", "nhs.net")
      .unwrap_err();
    assert!(matches!(err, Error::DomainRejected(_)));
    assert_eq!(err.to_string(), "Enter an nhs.net email address");
  }

  #[test]
  fn rejects_suffix_lookalikes() {
    assert!(validated_email_domain("x@evilnhs.net", "nhs.net").is_err());
  }

  #[test]
  fn rejects_missing_at_sign() {
    assert!(validated_email_domain("notanemail.address", "nhs.net").is_err());
  }

  #[test]
  fn rejects_empty_local_part() {
    assert!(validated_email_domain("@nhs.net", "nhs.net").is_err());
  }
}
