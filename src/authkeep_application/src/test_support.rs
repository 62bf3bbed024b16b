//! In-memory doubles for the ports, shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use authkeep_core::{
    AccessClaims, CredentialHasher, Email, EmailClient, EmailClientError, HasherError, NewUser,
    OtpCode, OtpRecord, OtpStore, OtpStoreError, Pagination, Password, RefreshClaims, ResetClaims,
    Role, SessionTokens, TokenClaims, TokenError, TokenKind, TokenService, User, UserId, UserPage,
    UserStore, UserStoreError, Username,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(address: &str) -> Email {
    Email::try_from(Secret::from(address.to_string())).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::from(value.to_string())).unwrap()
}

pub fn new_user(name: &str, address: &str, role: &str) -> NewUser {
    NewUser::parse(
        name.to_string(),
        Secret::from(address.to_string()),
        Secret::from("password123".to_string()),
        role,
    )
    .unwrap()
}

pub fn stored_user(name: &str, address: &str, role: Role) -> User {
    User::new(
        Username::parse(name.to_string()).unwrap(),
        email(address),
        Secret::from("hashed:password123".to_string()),
        role,
        Utc::now(),
    )
}

pub fn claims_for(user: &User) -> AccessClaims {
    AccessClaims {
        user_id: *user.id(),
        email: user.email().clone(),
        username: user.username().clone(),
        role: user.role(),
        expires_at: i64::MAX,
    }
}

#[derive(Default, Clone)]
pub struct MockUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MockUserStore {
    pub async fn with_users(users: Vec<User>) -> Self {
        let store = Self::default();
        store.users.write().await.extend(users);
        store
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.push(user);
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id() == id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn list_users(&self, pagination: Pagination) -> Result<UserPage, UserStoreError> {
        let users = self.users.read().await;
        let page = users
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        Ok(UserPage {
            users: page,
            total_count: users.len() as u64,
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
        if users.iter().any(|u| u.email() == &email && u.id() != id) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = users
            .iter_mut()
            .find(|u| u.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_profile(email, username, now);
        Ok(user.clone())
    }

    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash, now);
        Ok(())
    }

    async fn touch(&self, id: &UserId, now: DateTime<Utc>) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.touch(now);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id() != id);
        if users.len() == before {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MockOtpStore {
    records: Arc<RwLock<HashMap<Email, OtpRecord>>>,
    spent_reset_tokens: Arc<RwLock<Vec<String>>>,
}

impl MockOtpStore {
    pub async fn record_for(&self, email: &Email) -> Option<OtpRecord> {
        self.records.read().await.get(email).cloned()
    }
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn replace_code(&self, record: OtpRecord) -> Result<(), OtpStoreError> {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
        Ok(())
    }

    async fn redeem_code(
        &self,
        email: &Email,
        code: &OtpCode,
        now: DateTime<Utc>,
    ) -> Result<(), OtpStoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(email).ok_or(OtpStoreError::InvalidCode)?;
        record.redeem(code, now)?;
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_id: &str,
        _expires_at: i64,
    ) -> Result<bool, OtpStoreError> {
        let mut spent = self.spent_reset_tokens.write().await;
        if spent.iter().any(|id| id == token_id) {
            return Ok(false);
        }
        spent.push(token_id.to_owned());
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Clone)]
pub struct MockEmailClient {
    configured: bool,
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn configured() -> Self {
        Self {
            configured: true,
            sent: Arc::default(),
        }
    }

    pub fn misconfigured() -> Self {
        Self {
            configured: false,
            sent: Arc::default(),
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            html: html_content.to_string(),
            text: text_content.to_string(),
        });
        Ok(())
    }

    fn ensure_configured(&self) -> Result<(), EmailClientError> {
        if self.configured {
            Ok(())
        } else {
            Err(EmailClientError::Misconfigured(
                "missing sender".to_string(),
            ))
        }
    }
}

/// Stores `hashed:<password>`.
#[derive(Default, Clone)]
pub struct MockHasher;

#[async_trait]
impl CredentialHasher for MockHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, HasherError> {
        Ok(Secret::from(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(
        &self,
        password_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, HasherError> {
        let expected = format!("hashed:{}", candidate.as_ref().expose_secret());
        Ok(password_hash.expose_secret() == &expected)
    }
}

/// Tokens look like `<kind>|<subject>`; an `expired|` prefix simulates expiry.
#[derive(Default, Clone)]
pub struct MockTokenService {
    users: MockUserStore,
}

impl MockTokenService {
    pub fn backed_by(users: MockUserStore) -> Self {
        Self { users }
    }

    pub fn token_for(kind: TokenKind, subject: &str) -> String {
        format!("{kind}|{subject}")
    }
}

impl TokenService for MockTokenService {
    fn issue_session_pair(&self, user: &User) -> Result<SessionTokens, TokenError> {
        Ok(SessionTokens {
            access_token: Self::token_for(TokenKind::Access, &user.id().to_string()),
            refresh_token: Self::token_for(TokenKind::Refresh, &user.id().to_string()),
        })
    }

    fn issue_reset_token(&self, email: &Email) -> Result<String, TokenError> {
        Ok(Self::token_for(
            TokenKind::Reset,
            email.as_ref().expose_secret(),
        ))
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        if token.starts_with("expired|") {
            return Err(TokenError::Expired);
        }
        let (kind, subject) = token.split_once('|').ok_or(TokenError::Invalid)?;
        let found = match kind {
            "access" => TokenKind::Access,
            "refresh" => TokenKind::Refresh,
            "reset" => TokenKind::Reset,
            _ => return Err(TokenError::Invalid),
        };
        if found != expected {
            return Err(TokenError::WrongKind { expected, found });
        }
        let claims = match found {
            TokenKind::Access => {
                let user_id = UserId::parse(subject).map_err(|_| TokenError::Invalid)?;
                let user = self
                    .users
                    .users
                    .try_read()
                    .map_err(|e| TokenError::UnexpectedError(e.to_string()))?
                    .iter()
                    .find(|u| u.id() == &user_id)
                    .cloned()
                    .ok_or(TokenError::Invalid)?;
                TokenClaims::Access(claims_for(&user))
            }
            TokenKind::Refresh => TokenClaims::Refresh(RefreshClaims {
                user_id: UserId::parse(subject).map_err(|_| TokenError::Invalid)?,
                expires_at: i64::MAX,
            }),
            TokenKind::Reset => TokenClaims::Reset(ResetClaims {
                email: Email::try_from(Secret::from(subject.to_string()))
                    .map_err(|_| TokenError::Invalid)?,
                token_id: token.to_owned(),
                expires_at: i64::MAX,
            }),
        };
        Ok(claims)
    }
}
