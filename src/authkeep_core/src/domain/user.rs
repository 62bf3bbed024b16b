use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{email::Email, password::Password, role::Role, user_id::UserId, username::Username};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Email must not be empty")]
    EmptyEmail,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long")]
    InvalidPassword,
    #[error("Username must be between 1 and 24 characters long")]
    InvalidUsername,
    #[error("User type must be either ADMIN or USER")]
    InvalidRole,
    #[error("Invalid user id")]
    InvalidUserId,
}

/// A signup candidate whose fields have all passed validation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password: Password,
    pub role: Role,
}

impl NewUser {
    pub fn parse(
        username: String,
        email: Secret<String>,
        password: Secret<String>,
        role: &str,
    ) -> Result<Self, UserError> {
        Ok(Self {
            username: Username::parse(username)?,
            email: Email::try_from(email)?,
            password: Password::try_from(password)?,
            role: role.parse()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: Secret<String>,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: Username,
        email: Email,
        password_hash: Secret<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a user from persisted fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        username: Username,
        email: Email,
        password_hash: Secret<String>,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            role,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_profile(&mut self, email: Email, username: Username, now: DateTime<Utc>) {
        self.email = email;
        self.username = username;
        self.updated_at = now;
    }

    pub fn set_password_hash(&mut self, password_hash: Secret<String>, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.updated_at = now;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id,
            username: self.username.as_str().to_owned(),
            email: self.email.as_ref().expose_secret().clone(),
            user_type: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Client facing view of a user. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub user_type: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
