use authkeep_core::{AccessClaims, UserId, UserProfile, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("Not allowed to read this user")]
    Forbidden,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct GetUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> GetUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip(self, actor))]
    pub async fn execute(
        &self,
        actor: &AccessClaims,
        user_id: UserId,
    ) -> Result<UserProfile, GetUserError> {
        if !actor.may_act_on(&user_id) {
            return Err(GetUserError::Forbidden);
        }
        let user = self.user_store.get_user(&user_id).await?;
        Ok(user.profile())
    }
}
