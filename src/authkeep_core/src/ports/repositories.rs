use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp::{OtpCode, OtpError, OtpRecord},
    pagination::{Pagination, UserPage},
    user::User,
    user_id::UserId,
    username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistent user records. Implementations enforce email uniqueness themselves,
/// so `add_user` and `update_profile` report `UserAlreadyExists` on a clash.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    /// Users ordered by `(created_at, id)`.
    async fn list_users(&self, pagination: Pagination) -> Result<UserPage, UserStoreError>;
    async fn update_profile(
        &self,
        id: &UserId,
        email: Email,
        username: Username,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError>;
    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;
    async fn touch(&self, id: &UserId, now: DateTime<Utc>) -> Result<User, UserStoreError>;
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError>;
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    #[error("Invalid OTP")]
    InvalidCode,
    #[error("OTP expired")]
    Expired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl From<OtpError> for OtpStoreError {
    fn from(error: OtpError) -> Self {
        match error {
            OtpError::Malformed | OtpError::Invalid => OtpStoreError::InvalidCode,
            OtpError::Expired => OtpStoreError::Expired,
        }
    }
}

impl PartialEq for OtpStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidCode, Self::InvalidCode)
                | (Self::Expired, Self::Expired)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Drops every record held for `record.email` and stores `record`, as one
    /// atomic step.
    async fn replace_code(&self, record: OtpRecord) -> Result<(), OtpStoreError>;

    /// Atomically redeems the record for `email` against `code` at `now`.
    async fn redeem_code(
        &self,
        email: &Email,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> Result<(), OtpStoreError>;

    /// Records the reset token `token_id` as spent until `expires_at` (unix
    /// seconds). Returns `false` when it had already been spent.
    async fn consume_reset_token(
        &self,
        token_id: &str,
        expires_at: i64,
    ) -> Result<bool, OtpStoreError>;

    async fn issue(&self, email: &Email, ttl: Duration) -> Result<OtpCode, OtpStoreError> {
        let code = OtpCode::generate();
        let record = OtpRecord::new(email.clone(), code.clone(), Utc::now() + ttl);
        self.replace_code(record).await?;
        Ok(code)
    }

    async fn verify(&self, email: &Email, code: &OtpCode) -> Result<(), OtpStoreError> {
        self.redeem_code(email, code, Utc::now()).await
    }
}
