//! Syntactic recipient address check.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ComposeError;

/// `local@domain.tld`: no whitespace, a single `@`, at least one dot in the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Permissive shape check, not RFC 5322 validation.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_SHAPE.is_match(address)
}

/// Check every recipient, failing on the first address that does not pass.
pub fn validate_recipients<S: AsRef<str>>(to: &[S]) -> Result<(), ComposeError> {
    if to.is_empty() {
        return Err(ComposeError::NoRecipients);
    }
    match to.iter().find(|addr| !is_valid_email(addr.as_ref())) {
        Some(bad) => Err(ComposeError::InvalidRecipient(bad.as_ref().to_string())),
        None => Ok(()),
    }
}
