use std::sync::Arc;

use authkeep_core::{Email, EmailClient, EmailClientError};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// Records outgoing mail instead of delivering it.
#[derive(Debug, Clone)]
pub struct MockEmailClient {
    configured: bool,
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl Default for MockEmailClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self {
            configured: true,
            sent: Arc::default(),
        }
    }

    /// Behaves like a client with no sender credentials.
    pub fn misconfigured() -> Self {
        Self {
            configured: false,
            sent: Arc::default(),
        }
    }

    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError> {
        self.ensure_configured()?;
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_owned(),
            html_content: html_content.to_owned(),
            text_content: text_content.to_owned(),
        });
        Ok(())
    }

    fn ensure_configured(&self) -> Result<(), EmailClientError> {
        if self.configured {
            Ok(())
        } else {
            Err(EmailClientError::Misconfigured(
                "mock client has no sender".to_string(),
            ))
        }
    }
}
