//! Local shape checks.
//!
//! The email check is the only rule enforced before talking to the
//! identity provider, and only the reset flow applies it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Whole-string email shape: local part, `@`, dotted domain, 2–64 letter TLD.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Z0-9a-z.-]+\.[A-Za-z]{2,64}$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::Email(email.to_string()))
    }
}
