use authkeep_core::{TokenError, TokenService, UserStore, UserStoreError};
use chrono::Utc;

use super::login::AuthenticatedSession;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    TokenError(#[from] TokenError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Exchanges a refresh token for a new session pair bound to the current user record.
pub struct RefreshUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenService + ?Sized,
{
    user_store: &'a U,
    tokens: &'a T,
}

impl<'a, U, T> RefreshUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(user_store: &'a U, tokens: &'a T) -> Self {
        Self { user_store, tokens }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<AuthenticatedSession, RefreshError> {
        let claims = self.tokens.validate_refresh(refresh_token)?;

        let user = self.user_store.touch(&claims.user_id, Utc::now()).await?;
        let tokens = self.tokens.issue_session_pair(&user)?;

        Ok(AuthenticatedSession {
            tokens,
            profile: user.profile(),
        })
    }
}
