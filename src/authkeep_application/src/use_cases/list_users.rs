use authkeep_core::{AccessClaims, Pagination, UserPage, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ListUsersError {
    #[error("Only admins may list users")]
    Forbidden,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct ListUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> ListUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip(self, actor))]
    pub async fn execute(
        &self,
        actor: &AccessClaims,
        pagination: Pagination,
    ) -> Result<UserPage, ListUsersError> {
        if !actor.role.is_admin() {
            return Err(ListUsersError::Forbidden);
        }
        Ok(self.user_store.list_users(pagination).await?)
    }
}
