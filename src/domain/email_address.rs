use crate::domain::{Field, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// local@domain.tld: a single '@', at least one '.' after it, no whitespace anywhere.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile the email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: String) -> Result<EmailAddress, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::required(Field::Email));
        }
        if EMAIL_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::format(Field::Email))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
