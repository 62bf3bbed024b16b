use authkeep_core::{Email, OtpCode, OtpStore, OtpStoreError, TokenError, TokenService};

#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error(transparent)]
    OtpStoreError(#[from] OtpStoreError),
    #[error(transparent)]
    TokenError(#[from] TokenError),
}

/// Redeems a passcode and hands back a reset token scoped to the same email.
pub struct VerifyOtpUseCase<'a, O, T>
where
    O: OtpStore + ?Sized,
    T: TokenService + ?Sized,
{
    otp_store: &'a O,
    tokens: &'a T,
}

impl<'a, O, T> VerifyOtpUseCase<'a, O, T>
where
    O: OtpStore + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(otp_store: &'a O, tokens: &'a T) -> Self {
        Self { otp_store, tokens }
    }

    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip(self, code))]
    pub async fn execute(&self, email: Email, code: OtpCode) -> Result<String, VerifyOtpError> {
        self.otp_store.verify(&email, &code).await?;
        Ok(self.tokens.issue_reset_token(&email)?)
    }
}
