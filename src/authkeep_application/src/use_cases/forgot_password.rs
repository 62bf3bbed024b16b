use askama::Template;
use authkeep_core::{
    Email, EmailClient, EmailClientError, OtpStore, OtpStoreError, UserStore, UserStoreError,
};
use chrono::Duration;

use crate::emails::{RESET_PASSWORD_SUBJECT, ResetPasswordEmail};

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error(transparent)]
    EmailClientError(#[from] EmailClientError),
    #[error("Failed to render email: {0}")]
    TemplateError(String),
}

/// Issues a one-time passcode and mails it to a registered address.
pub struct ForgotPasswordUseCase<'a, U, O, E>
where
    U: UserStore + ?Sized,
    O: OtpStore + ?Sized,
    E: EmailClient + ?Sized,
{
    user_store: &'a U,
    otp_store: &'a O,
    email_client: &'a E,
    otp_ttl: Duration,
}

impl<'a, U, O, E> ForgotPasswordUseCase<'a, U, O, E>
where
    U: UserStore + ?Sized,
    O: OtpStore + ?Sized,
    E: EmailClient + ?Sized,
{
    pub fn new(user_store: &'a U, otp_store: &'a O, email_client: &'a E, otp_ttl: Duration) -> Self {
        Self {
            user_store,
            otp_store,
            email_client,
            otp_ttl,
        }
    }

    /// Sender credentials are checked before a code is issued, so a
    /// misconfigured mailer never leaves an undeliverable code behind.
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        self.user_store.get_user_by_email(&email).await?;
        self.email_client.ensure_configured()?;

        let code = self.otp_store.issue(&email, self.otp_ttl).await?;

        let message = ResetPasswordEmail {
            otp: code.as_str(),
            ttl_minutes: self.otp_ttl.num_minutes().max(1),
        };
        let html = message
            .render()
            .map_err(|e| ForgotPasswordError::TemplateError(e.to_string()))?;

        self.email_client
            .send_email(&email, RESET_PASSWORD_SUBJECT, &html, &message.text())
            .await?;

        Ok(())
    }
}
