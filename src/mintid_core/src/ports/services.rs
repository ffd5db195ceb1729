use async_trait::async_trait;

use crate::domain::{
    display_name::DisplayName, email::Email, verification_code::VerificationCode,
};

/// Outbound email delivery. One synchronous attempt per call; the transport
/// is expected to bound its own latency. Callers decide whether a failure is
/// fatal - registration treats it as fire-and-forget.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
        name: &DisplayName,
    ) -> Result<(), String>;
}
