use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mintid_core::{
    Account, AccountStore, AccountStoreError, Email, IssuedCode, NewAccount, Password, UserId,
};
use tokio::sync::RwLock;

#[derive(Debug)]
struct AccountRecord {
    account: Account,
    password: Password,
    codes: Vec<IssuedCode>,
}

/// HashMap-backed store for tests and local runs. Plaintext comparison
/// instead of a real KDF keeps test suites fast; the Postgres adapter is the
/// one that hashes.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    records: Arc<RwLock<HashMap<UserId, AccountRecord>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a code row for a user, as a later issuance would. Lets tests
    /// exercise the "only the newest code counts" rule and expiry handling.
    pub async fn push_code(&self, user: UserId, code: IssuedCode) {
        if let Some(record) = self.records.write().await.get_mut(&user) {
            record.codes.push(code);
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_account(
        &self,
        account: NewAccount,
        code: IssuedCode,
    ) -> Result<UserId, AccountStoreError> {
        let mut records = self.records.write().await;
        if records
            .values()
            .any(|r| r.account.email == account.email)
        {
            return Err(AccountStoreError::EmailTaken);
        }

        let id = UserId::new();
        records.insert(
            id,
            AccountRecord {
                account: Account {
                    id,
                    email: account.email,
                    name: account.name,
                    verified: false,
                },
                password: account.password,
                codes: vec![code],
            },
        );
        Ok(id)
    }

    async fn latest_code(&self, user: UserId) -> Result<IssuedCode, AccountStoreError> {
        let records = self.records.read().await;
        records
            .get(&user)
            .and_then(|r| r.codes.iter().max_by_key(|c| c.created_at))
            .cloned()
            .ok_or(AccountStoreError::CodeNotFound)
    }

    async fn mark_verified(&self, user: UserId) -> Result<(), AccountStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user)
            .ok_or(AccountStoreError::AccountNotFound)?;
        record.account.verified = true;
        Ok(())
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let records = self.records.read().await;
        let record = records
            .values()
            .find(|r| r.account.email == *email)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if record.password != *password {
            return Err(AccountStoreError::IncorrectPassword);
        }

        Ok(record.account.clone())
    }

    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, AccountStoreError> {
        let mut purged = 0;
        let mut records = self.records.write().await;
        for record in records.values_mut() {
            let before = record.codes.len();
            record.codes.retain(|c| !c.is_expired(now));
            purged += (before - record.codes.len()) as u64;
        }
        Ok(purged)
    }
}
