use authkeep_core::{
    CredentialHasher, Email, HasherError, Password, SessionTokens, TokenError, TokenService,
    UserProfile, UserStore, UserStoreError,
};

/// Tokens minted for a user together with the profile they were minted for.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub tokens: SessionTokens,
    pub profile: UserProfile,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error(transparent)]
    HasherError(#[from] HasherError),
    #[error(transparent)]
    TokenError(#[from] TokenError),
}

/// Login use case - handles user authentication
pub struct LoginUseCase<'a, U, H, T>
where
    U: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    user_store: &'a U,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, U, H, T> LoginUseCase<'a, U, H, T>
where
    U: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub fn new(user_store: &'a U, hasher: &'a H, tokens: &'a T) -> Self {
        Self {
            user_store,
            hasher,
            tokens,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// A fresh session pair and the user's profile. No token is minted unless the
    /// password verifies.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticatedSession, LoginError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        if !self.hasher.verify(user.password_hash(), &password).await? {
            return Err(LoginError::IncorrectPassword);
        }

        let tokens = self.tokens.issue_session_pair(&user)?;

        Ok(AuthenticatedSession {
            tokens,
            profile: user.profile(),
        })
    }
}
