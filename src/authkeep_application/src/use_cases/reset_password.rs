use authkeep_core::{
    CredentialHasher, Email, HasherError, OtpStore, OtpStoreError, Password, ResetClaims,
    UserStore, UserStoreError,
};
use chrono::Utc;

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Reset token was not issued for this email")]
    EmailMismatch,
    #[error("Reset token has already been used")]
    TokenAlreadyUsed,
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error(transparent)]
    HasherError(#[from] HasherError),
}

/// Sets a new password for the email a reset token was issued to. Each token
/// changes the password at most once.
pub struct ResetPasswordUseCase<'a, U, O, H>
where
    U: UserStore + ?Sized,
    O: OtpStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    user_store: &'a U,
    otp_store: &'a O,
    hasher: &'a H,
}

impl<'a, U, O, H> ResetPasswordUseCase<'a, U, O, H>
where
    U: UserStore + ?Sized,
    O: OtpStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(user_store: &'a U, otp_store: &'a O, hasher: &'a H) -> Self {
        Self {
            user_store,
            otp_store,
            hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, claims, new_password))]
    pub async fn execute(
        &self,
        claims: &ResetClaims,
        email: Email,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        if claims.email != email {
            return Err(ResetPasswordError::EmailMismatch);
        }

        if !self
            .otp_store
            .consume_reset_token(&claims.token_id, claims.expires_at)
            .await?
        {
            return Err(ResetPasswordError::TokenAlreadyUsed);
        }

        let password_hash = self.hasher.hash(&new_password).await?;
        self.user_store
            .set_password_hash(&email, password_hash, Utc::now())
            .await?;

        Ok(())
    }
}
