use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

pub const CODE_LENGTH: usize = 6;
pub const CODE_TTL_MINUTES: i64 = 10;

/// A 6-digit numeric verification code. Stored and compared as text so
/// leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationCodeError {
    #[error("Verification code must be {CODE_LENGTH} digits")]
    Malformed,
}

impl VerificationCode {
    /// Each digit is drawn independently so "042137" is as likely as any
    /// other value.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        Self(
            (0..CODE_LENGTH)
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect(),
        )
    }

    pub fn parse(raw: &str) -> Result<Self, VerificationCodeError> {
        let trimmed = raw.trim();
        if trimmed.len() != CODE_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationCodeError::Malformed);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A code row as persisted: the value plus its issuance window.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub value: VerificationCode,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedCode {
    pub fn issue(value: VerificationCode, now: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
