use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    token::{AccessClaims, RefreshClaims, ResetClaims, SessionTokens, TokenClaims, TokenKind},
    user::User,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailClientError {
    #[error("Email client is misconfigured: {0}")]
    Misconfigured(String),
    #[error("Failed to deliver email: {0}")]
    Delivery(String),
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError>;

    /// Reports missing sender credentials before any work is done on their behalf.
    fn ensure_configured(&self) -> Result<(), EmailClientError> {
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Credential hashing failed: {0}")]
pub struct HasherError(pub String);

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError>;

    /// `Ok(false)` on mismatch; `Err` only when the digest itself is unusable.
    async fn verify(
        &self,
        password_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, HasherError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token expired")]
    Expired,
    #[error("Expected a {expected} token but got a {found} token")]
    WrongKind { expected: TokenKind, found: TokenKind },
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Invalid, Self::Invalid) | (Self::Expired, Self::Expired) => true,
            (
                Self::WrongKind { expected, found },
                Self::WrongKind {
                    expected: other_expected,
                    found: other_found,
                },
            ) => expected == other_expected && found == other_found,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Issues and verifies signed session, refresh and reset tokens.
///
/// `validate` checks the signature, the expiry and the token kind, so a token
/// of one kind is never accepted where another kind is expected.
pub trait TokenService: Send + Sync {
    fn issue_session_pair(&self, user: &User) -> Result<SessionTokens, TokenError>;

    fn issue_reset_token(&self, email: &Email) -> Result<String, TokenError>;

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError>;

    fn validate_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        match self.validate(token, TokenKind::Access)? {
            TokenClaims::Access(claims) => Ok(claims),
            other => Err(TokenError::WrongKind {
                expected: TokenKind::Access,
                found: other.kind(),
            }),
        }
    }

    fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        match self.validate(token, TokenKind::Refresh)? {
            TokenClaims::Refresh(claims) => Ok(claims),
            other => Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                found: other.kind(),
            }),
        }
    }

    fn validate_reset(&self, token: &str) -> Result<ResetClaims, TokenError> {
        match self.validate(token, TokenKind::Reset)? {
            TokenClaims::Reset(claims) => Ok(claims),
            other => Err(TokenError::WrongKind {
                expected: TokenKind::Reset,
                found: other.kind(),
            }),
        }
    }
}
