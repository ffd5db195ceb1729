use chrono::Utc;
use mintid_core::{
    AccountStore, AccountStoreError, EmailClient, IssuedCode, NewAccount, UserId, VerificationCode,
};

/// Outcome of a successful registration.
///
/// `code_delivered` records whether the verification email went out. Delivery
/// is fire-and-forget by contract, so the HTTP response never changes on
/// failure - the flag exists for observability at the call site.
#[derive(Debug, PartialEq, Eq)]
pub struct Registration {
    pub user_id: UserId,
    pub code_delivered: bool,
}

/// Register use case - creates an unverified account and its first
/// verification code, then attempts delivery.
pub struct RegisterUseCase<S, E>
where
    S: AccountStore,
    E: EmailClient,
{
    store: S,
    email_client: E,
}

impl<S, E> RegisterUseCase<S, E>
where
    S: AccountStore,
    E: EmailClient,
{
    pub fn new(store: S, email_client: E) -> Self {
        Self {
            store,
            email_client,
        }
    }

    /// Execute the register use case
    ///
    /// The account and its code are committed as one unit by the store; the
    /// email attempt happens after the commit and cannot roll it back.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, account: NewAccount) -> Result<Registration, AccountStoreError> {
        let recipient = account.email.clone();
        let name = account.name.clone();

        let code = VerificationCode::generate();
        let issued = IssuedCode::issue(code.clone(), Utc::now());

        let user_id = self.store.create_account(account, issued).await?;

        let code_delivered = match self
            .email_client
            .send_verification_code(&recipient, &code, &name)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%user_id, %error, "verification email delivery failed");
                false
            }
        };

        Ok(Registration {
            user_id,
            code_delivered,
        })
    }
}
