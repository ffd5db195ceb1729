use std::sync::Arc;

use mintid_core::{DisplayName, Email, EmailClient, VerificationCode};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub code: String,
    pub name: String,
}

/// Recording email client for tests and local runs. The `failing`
/// constructor simulates an unreachable notifier so callers can assert the
/// fire-and-forget contract.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
    fail_sends: bool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            outbox: Arc::default(),
            fail_sends: true,
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
        name: &DisplayName,
    ) -> Result<(), String> {
        if self.fail_sends {
            return Err("mock email client configured to fail".to_string());
        }
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            code: code.as_str().to_string(),
            name: name.as_str().to_string(),
        });
        Ok(())
    }
}
