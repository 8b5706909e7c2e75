use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::mailer::Mailer;
use shared::config::MailerConfig;
use shared::error::{AppError, AppResult};

/// Mail transport backed by an HTTP gateway that accepts a base64-encoded
/// RFC822 message, the way the institutional relay does.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(config: &MailerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            access_token: config.access_token.clone(),
            sender: config.sender.clone(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.sender, to, subject, body
        );
        let raw = general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes());

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail gateway error: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "mail gateway returned {}",
                res.status()
            )));
        }

        Ok(())
    }
}
