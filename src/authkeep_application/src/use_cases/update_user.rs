use authkeep_core::{AccessClaims, Email, UserId, UserProfile, UserStore, UserStoreError, Username};
use chrono::Utc;

#[derive(Debug, thiserror::Error)]
pub enum UpdateUserError {
    #[error("Not allowed to update this user")]
    Forbidden,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Changes a user's email and username. Without an explicit target the caller
/// updates their own record.
pub struct UpdateUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> UpdateUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UpdateUserUseCase::execute", skip(self, actor))]
    pub async fn execute(
        &self,
        actor: &AccessClaims,
        target: Option<UserId>,
        email: Email,
        username: Username,
    ) -> Result<UserProfile, UpdateUserError> {
        let user_id = target.unwrap_or(actor.user_id);
        if !actor.may_act_on(&user_id) {
            return Err(UpdateUserError::Forbidden);
        }

        let user = self
            .user_store
            .update_profile(&user_id, email, username, Utc::now())
            .await?;
        Ok(user.profile())
    }
}
