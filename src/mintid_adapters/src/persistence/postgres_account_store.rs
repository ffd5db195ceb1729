use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use chrono::{DateTime, Utc};
use mintid_core::{
    Account, AccountStore, AccountStoreError, DisplayName, Email, IssuedCode, NewAccount,
    Password, UserId, VerificationCode,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected(e: impl std::fmt::Display) -> AccountStoreError {
    AccountStoreError::Unexpected(e.to_string())
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Creating account in PostgreSQL", skip_all)]
    async fn create_account(
        &self,
        account: NewAccount,
        code: IssuedCode,
    ) -> Result<UserId, AccountStoreError> {
        let password_hash = compute_password_hash(account.password.clone())
            .await
            .map_err(AccountStoreError::Unexpected)?;

        let user_id = UserId::new();
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, name)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(account.email.as_ref().expose_secret())
        .bind(password_hash.expose_secret())
        .bind(account.name.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::EmailTaken;
                }
            }
            unexpected(e)
        })?;

        sqlx::query(
            r#"
                INSERT INTO verification_codes (user_id, code, created_at, expires_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(code.value.as_str())
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(user_id)
    }

    #[tracing::instrument(name = "Fetching latest verification code", skip_all)]
    async fn latest_code(&self, user: UserId) -> Result<IssuedCode, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT code, created_at, expires_at
                FROM verification_codes
                WHERE user_id = $1
                ORDER BY created_at DESC
                LIMIT 1
            "#,
        )
        .bind(user.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(AccountStoreError::CodeNotFound);
        };

        issued_code_from_row(&row)
    }

    #[tracing::instrument(name = "Marking account verified", skip_all)]
    async fn mark_verified(&self, user: UserId) -> Result<(), AccountStoreError> {
        let result = sqlx::query("UPDATE users SET verified = TRUE WHERE id = $1")
            .bind(user.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Validating credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, name, verified
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        let stored_hash: String = row.try_get("password_hash").map_err(unexpected)?;
        verify_password_hash(Secret::from(stored_hash), password.clone())
            .await
            .map_err(|_| AccountStoreError::IncorrectPassword)?;

        account_from_row(&row)
    }

    #[tracing::instrument(name = "Purging expired verification codes", skip_all)]
    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, AccountStoreError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected())
    }
}

fn issued_code_from_row(row: &PgRow) -> Result<IssuedCode, AccountStoreError> {
    let value: String = row.try_get("code").map_err(unexpected)?;
    Ok(IssuedCode {
        value: VerificationCode::parse(&value).map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
        expires_at: row.try_get("expires_at").map_err(unexpected)?,
    })
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let name: String = row.try_get("name").map_err(unexpected)?;

    Ok(Account {
        id: UserId::from(id),
        email: Email::try_from(Secret::from(email)).map_err(unexpected)?,
        name: DisplayName::parse(&name).map_err(unexpected)?,
        verified: row.try_get("verified").map_err(unexpected)?,
    })
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
