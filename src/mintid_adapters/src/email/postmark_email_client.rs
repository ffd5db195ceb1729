use mintid_core::{CODE_TTL_MINUTES, DisplayName, Email, EmailClient, VerificationCode};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

/// Delivers verification codes through the Postmark HTTP API.
///
/// The `reqwest` client is expected to carry a request timeout, which bounds
/// how long a registration can wait on a slow notifier.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending verification email", skip_all)]
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
        name: &DisplayName,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join("/email").map_err(|e| e.to_string())?;

        let subject = format!("Your verification code: {code}");
        let html_body = format!(
            "<p>Hi {name}!</p>\
             <p>Enter this code to finish signing up:</p>\
             <p><strong>{code}</strong></p>\
             <p>The code is valid for {CODE_TTL_MINUTES} minutes. If you didn't \
             sign up, you can ignore this email.</p>"
        );
        let text_body = format!(
            "Hi {name}! Your verification code is {code}. \
             It is valid for {CODE_TTL_MINUTES} minutes."
        );

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: &subject,
            html_body: &html_body,
            text_body: &text_body,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
