use authkeep_core::{
    CredentialHasher, HasherError, NewUser, User, UserProfile, UserStore, UserStoreError,
};
use chrono::Utc;

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error(transparent)]
    HasherError(#[from] HasherError),
}

/// Signup use case - handles user registration
pub struct SignupUseCase<'a, U, H>
where
    U: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> SignupUseCase<'a, U, H>
where
    U: UserStore + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Registers `candidate` and returns its public profile.
    ///
    /// The email pre-check only saves a hash computation; the store's own
    /// uniqueness guarantee is what rejects concurrent duplicates.
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(&self, candidate: NewUser) -> Result<UserProfile, SignupError> {
        match self.user_store.get_user_by_email(&candidate.email).await {
            Ok(_) => return Err(UserStoreError::UserAlreadyExists.into()),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hasher.hash(&candidate.password).await?;
        let user = User::new(
            candidate.username,
            candidate.email,
            password_hash,
            candidate.role,
            Utc::now(),
        );
        let profile = user.profile();

        self.user_store.add_user(user).await?;
        tracing::info!(user_id = %profile.user_id, "user registered");
        Ok(profile)
    }
}
