use chrono::Utc;
use mintid_core::{AccountStore, AccountStoreError, UserId};

/// Error types specific to the verify email use case
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum VerifyEmailError {
    #[error("No verification code found")]
    CodeNotFound,
    #[error("Verification code has expired")]
    CodeExpired,
    #[error("Incorrect verification code")]
    CodeMismatch,
    #[error("Account store error: {0}")]
    Store(AccountStoreError),
}

/// Verify email use case - checks a submitted code against the most recent
/// one issued for the account and flips the verified flag.
pub struct VerifyEmailUseCase<S>
where
    S: AccountStore,
{
    store: S,
}

impl<S> VerifyEmailUseCase<S>
where
    S: AccountStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute the verify email use case
    ///
    /// Only the latest code row counts; an older unexpired code is rejected
    /// even when its value matches. Expiry is checked before the value, so an
    /// expired code reports as expired rather than mismatched.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip(self, submitted))]
    pub async fn execute(&self, user_id: UserId, submitted: &str) -> Result<(), VerifyEmailError> {
        let issued = self.store.latest_code(user_id).await.map_err(|e| match e {
            AccountStoreError::CodeNotFound => VerifyEmailError::CodeNotFound,
            other => VerifyEmailError::Store(other),
        })?;

        if issued.is_expired(Utc::now()) {
            return Err(VerifyEmailError::CodeExpired);
        }

        if !issued.value.matches(submitted) {
            return Err(VerifyEmailError::CodeMismatch);
        }

        self.store
            .mark_verified(user_id)
            .await
            .map_err(VerifyEmailError::Store)?;

        Ok(())
    }
}
