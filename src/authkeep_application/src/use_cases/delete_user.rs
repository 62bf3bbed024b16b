use authkeep_core::{AccessClaims, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("Not allowed to delete this user")]
    Forbidden,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct DeleteUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> DeleteUserUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip(self, actor))]
    pub async fn execute(&self, actor: &AccessClaims, user_id: UserId) -> Result<(), DeleteUserError> {
        if !actor.may_act_on(&user_id) {
            return Err(DeleteUserError::Forbidden);
        }
        self.user_store.delete_user(&user_id).await?;
        tracing::info!(%user_id, "user deleted");
        Ok(())
    }
}
