use std::sync::Arc;

use authkeep_core::{
    AccessClaims, CredentialHasher, Email, EmailClient, NewUser, OtpCode, OtpStore, Pagination,
    Password, ResetClaims, TokenService, UserId, UserPage, UserProfile, UserStore, Username,
};
use chrono::Duration;

use crate::use_cases::{
    AuthenticatedSession, DeleteUserError, DeleteUserUseCase, ForgotPasswordError,
    ForgotPasswordUseCase, GetUserError, GetUserUseCase, ListUsersError, ListUsersUseCase,
    LoginError, LoginUseCase, RefreshError, RefreshUseCase, ResetPasswordError,
    ResetPasswordUseCase, SignupError, SignupUseCase, UpdateUserError, UpdateUserUseCase,
    VerifyOtpError, VerifyOtpUseCase,
};

pub const DEFAULT_OTP_TTL_SECONDS: i64 = 5 * 60;

/// Account lifecycle operations over injected stores and services.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AccountService {
    user_store: Arc<dyn UserStore>,
    otp_store: Arc<dyn OtpStore>,
    email_client: Arc<dyn EmailClient>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
    otp_ttl: Duration,
}

impl AccountService {
    pub fn new<U, O, E, H, T>(
        user_store: U,
        otp_store: O,
        email_client: E,
        hasher: H,
        tokens: T,
    ) -> Self
    where
        U: UserStore + 'static,
        O: OtpStore + 'static,
        E: EmailClient + 'static,
        H: CredentialHasher + 'static,
        T: TokenService + 'static,
    {
        Self {
            user_store: Arc::new(user_store),
            otp_store: Arc::new(otp_store),
            email_client: Arc::new(email_client),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
            otp_ttl: Duration::seconds(DEFAULT_OTP_TTL_SECONDS),
        }
    }

    pub fn with_otp_ttl(mut self, otp_ttl: Duration) -> Self {
        self.otp_ttl = otp_ttl;
        self
    }

    pub fn tokens(&self) -> Arc<dyn TokenService> {
        Arc::clone(&self.tokens)
    }

    pub async fn signup(&self, candidate: NewUser) -> Result<UserProfile, SignupError> {
        SignupUseCase::new(&*self.user_store, &*self.hasher)
            .execute(candidate)
            .await
    }

    pub async fn login(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticatedSession, LoginError> {
        LoginUseCase::new(&*self.user_store, &*self.hasher, &*self.tokens)
            .execute(email, password)
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthenticatedSession, RefreshError> {
        RefreshUseCase::new(&*self.user_store, &*self.tokens)
            .execute(refresh_token)
            .await
    }

    pub async fn forgot_password(&self, email: Email) -> Result<(), ForgotPasswordError> {
        ForgotPasswordUseCase::new(
            &*self.user_store,
            &*self.otp_store,
            &*self.email_client,
            self.otp_ttl,
        )
        .execute(email)
        .await
    }

    pub async fn verify_otp(&self, email: Email, code: OtpCode) -> Result<String, VerifyOtpError> {
        VerifyOtpUseCase::new(&*self.otp_store, &*self.tokens)
            .execute(email, code)
            .await
    }

    pub async fn reset_password(
        &self,
        claims: &ResetClaims,
        email: Email,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        ResetPasswordUseCase::new(&*self.user_store, &*self.otp_store, &*self.hasher)
            .execute(claims, email, new_password)
            .await
    }

    pub async fn get_all(
        &self,
        actor: &AccessClaims,
        pagination: Pagination,
    ) -> Result<UserPage, ListUsersError> {
        ListUsersUseCase::new(&*self.user_store)
            .execute(actor, pagination)
            .await
    }

    pub async fn get_user(
        &self,
        actor: &AccessClaims,
        user_id: UserId,
    ) -> Result<UserProfile, GetUserError> {
        GetUserUseCase::new(&*self.user_store)
            .execute(actor, user_id)
            .await
    }

    pub async fn update_user(
        &self,
        actor: &AccessClaims,
        target: Option<UserId>,
        email: Email,
        username: Username,
    ) -> Result<UserProfile, UpdateUserError> {
        UpdateUserUseCase::new(&*self.user_store)
            .execute(actor, target, email, username)
            .await
    }

    pub async fn delete_user(
        &self,
        actor: &AccessClaims,
        user_id: UserId,
    ) -> Result<(), DeleteUserError> {
        DeleteUserUseCase::new(&*self.user_store)
            .execute(actor, user_id)
            .await
    }
}
