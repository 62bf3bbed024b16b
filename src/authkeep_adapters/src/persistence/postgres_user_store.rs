use authkeep_core::{
    Email, Pagination, Role, User, UserId, UserPage, UserStore, UserStoreError, Username,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn unexpected(e: impl ToString) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let role: String = row.try_get("role").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    Ok(User::from_parts(
        UserId::from(id),
        Username::parse(username).map_err(unexpected)?,
        Email::try_from(Secret::from(email)).map_err(unexpected)?,
        Secret::from(password_hash),
        role.parse::<Role>().map_err(unexpected)?,
        created_at,
        updated_at,
    ))
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, role, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().expose_secret())
        .bind(user.role().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        user_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        user_from_row(&row)
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip(self))]
    async fn list_users(&self, pagination: Pagination) -> Result<UserPage, UserStoreError> {
        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(pagination.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(UserPage {
            users: rows.iter().map(user_from_row).collect::<Result<_, _>>()?,
            total_count: u64::try_from(total_count).unwrap_or_default(),
            pagination,
        })
    }

    #[tracing::instrument(name = "Updating user profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: &UserId,
        email: Email,
        username: Username,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET email = $1, username = $2, updated_at = $3
                WHERE id = $4
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email.as_ref().expose_secret())
        .bind(username.as_str())
        .bind(now)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        user_from_row(&row)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1, updated_at = $2
                WHERE email = $3
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(now)
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Touching user in PostgreSQL", skip_all)]
    async fn touch(&self, id: &UserId, now: DateTime<Utc>) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET updated_at = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(now)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        user_from_row(&row)
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
