use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// Minimal shape check only; anything stricter belongs to the mail provider.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email regex must compile"));

/// A normalized email address: trimmed, lowercased and shape-checked.
///
/// The inner value is secret-wrapped so it never shows up in debug or trace
/// output; expose it only at the boundary that needs the raw string.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,
    #[error("Invalid email address")]
    Invalid,
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = raw.expose_secret().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(Secret::from(normalized)))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
