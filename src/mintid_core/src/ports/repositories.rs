use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    user::{Account, NewAccount, UserId},
    verification_code::IssuedCode,
};

#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("No verification code found")]
    CodeNotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::CodeNotFound, Self::CodeNotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// The single relational store behind all three operations.
///
/// One trait rather than separate user/code stores: registration must insert
/// the account and its first code as one atomic unit, which a split across
/// two repositories cannot express.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert an unverified account together with its first verification
    /// code. Both rows appear or neither does. Email uniqueness is enforced
    /// by the store itself, so a concurrent duplicate registration fails
    /// here with `EmailTaken` rather than creating a second row.
    async fn create_account(
        &self,
        account: NewAccount,
        code: IssuedCode,
    ) -> Result<UserId, AccountStoreError>;

    /// The most recently created code for the user. Older rows are never
    /// authoritative, even when unexpired.
    async fn latest_code(&self, user: UserId) -> Result<IssuedCode, AccountStoreError>;

    async fn mark_verified(&self, user: UserId) -> Result<(), AccountStoreError>;

    /// Credential check. `AccountNotFound` and `IncorrectPassword` are kept
    /// distinct here; collapsing them into one client-visible error is the
    /// caller's job.
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError>;

    /// Maintenance: drop code rows past expiry. Runs off the request path.
    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, AccountStoreError>;
}
