use std::collections::HashMap;
use std::sync::Arc;

use authkeep_core::{
    Email, Pagination, User, UserId, UserPage, UserStore, UserStoreError, Username,
};
use chrono::{DateTime, Utc};
use secrecy::Secret;
use tokio::sync::RwLock;

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_email.contains_key(user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.by_email.insert(user.email().clone(), *user.id());
        users.by_id.insert(*user.id(), user);
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn list_users(&self, pagination: Pagination) -> Result<UserPage, UserStoreError> {
        let users = self.users.read().await;
        let mut ordered: Vec<&User> = users.by_id.values().collect();
        ordered.sort_by_key(|user| (user.created_at(), *user.id()));

        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);

        Ok(UserPage {
            users: ordered
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
            total_count: users.by_id.len() as u64,
            pagination,
        })
    }

    async fn update_profile(
        &self,
        id: &UserId,
        email: Email,
        username: Username,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_email.get(&email).is_some_and(|owner| owner != id) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = users.by_id.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        let previous_email = user.email().clone();
        user.set_profile(email.clone(), username, now);
        let updated = user.clone();

        users.by_email.remove(&previous_email);
        users.by_email.insert(email, *id);
        Ok(updated)
    }

    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let id = *users
            .by_email
            .get(email)
            .ok_or(UserStoreError::UserNotFound)?;
        let user = users.by_id.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash, now);
        Ok(())
    }

    async fn touch(&self, id: &UserId, now: DateTime<Utc>) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.by_id.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.touch(now);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.by_id.remove(id).ok_or(UserStoreError::UserNotFound)?;
        users.by_email.remove(user.email());
        Ok(())
    }
}
