use authkeep_core::{Email, EmailClient, EmailClientError};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Option<Email>,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    /// A missing sender or an empty token is tolerated here and reported by
    /// `ensure_configured` when mail is actually needed.
    pub fn new(
        base_url: String,
        sender: Option<Email>,
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
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError> {
        self.ensure_configured()?;
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| EmailClientError::Misconfigured("sender is not set".to_string()))?;

        let base =
            Url::parse(&self.base_url).map_err(|e| EmailClientError::Misconfigured(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| EmailClientError::Misconfigured(e.to_string()))?;

        let request_body = SendEmailRequest {
            from: sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            html_body: html_content,
            text_body: text_content,
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
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailClientError::Delivery(e.to_string()))?;

        Ok(())
    }

    fn ensure_configured(&self) -> Result<(), EmailClientError> {
        if self.sender.is_none() {
            return Err(EmailClientError::Misconfigured(
                "sender is not set".to_string(),
            ));
        }
        if self.authorization_token.expose_secret().trim().is_empty() {
            return Err(EmailClientError::Misconfigured(
                "authorization token is not set".to_string(),
            ));
        }
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
