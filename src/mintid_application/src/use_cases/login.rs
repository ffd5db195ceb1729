use mintid_core::{Account, AccountStore, AccountStoreError, Email, Password};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LoginError {
    /// Unknown email and wrong password collapse into this one variant so a
    /// caller probing for registered addresses learns nothing.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Email not verified")]
    EmailNotVerified,
    #[error("Account store error: {0}")]
    Store(AccountStoreError),
}

/// Login use case - authenticates credentials and returns a minimal profile.
pub struct LoginUseCase<S>
where
    S: AccountStore,
{
    store: S,
}

impl<S> LoginUseCase<S>
where
    S: AccountStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute the login use case
    ///
    /// The verified flag is only consulted after the hash check succeeds;
    /// the unverified prompt is only ever shown to a caller holding valid
    /// credentials.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Account, LoginError> {
        let account = self
            .store
            .authenticate(&email, &password)
            .await
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound | AccountStoreError::IncorrectPassword => {
                    LoginError::InvalidCredentials
                }
                other => LoginError::Store(other),
            })?;

        if !account.verified {
            return Err(LoginError::EmailNotVerified);
        }

        Ok(account)
    }
}
