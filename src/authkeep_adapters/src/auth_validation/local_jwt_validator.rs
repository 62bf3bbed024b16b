use std::sync::Arc;

use async_trait::async_trait;
use authkeep_core::{AccessClaims, AuthValidator, ResetClaims, TokenError, TokenService};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use http::{HeaderMap, header::AUTHORIZATION};
use thiserror::Error;

/// Header that carries the reset token on `/password/reset`.
pub const RESET_TOKEN_HEADER: &str = "token";
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error(transparent)]
    TokenError(#[from] TokenError),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Accepts only access tokens, presented as `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct AccessTokenValidator {
    tokens: Arc<dyn TokenService>,
}

impl AccessTokenValidator {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthValidator for AccessTokenValidator {
    type Claims = AccessClaims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_bearer_token(&parts.headers)?;
        Ok(self.tokens.validate_access(token)?)
    }
}

/// Accepts only reset tokens, from the `token` header or a bearer credential.
#[derive(Clone)]
pub struct ResetTokenValidator {
    tokens: Arc<dyn TokenService>,
}

impl ResetTokenValidator {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthValidator for ResetTokenValidator {
    type Claims = ResetClaims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = match parts
            .headers
            .get(RESET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some(token) if !token.trim().is_empty() => token.trim(),
            _ => extract_bearer_token(&parts.headers)?,
        };
        Ok(self.tokens.validate_reset(token)?)
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenAuthError::MissingToken)
}

pub fn extract_token<'a>(jar: &'a CookieJar, cookie_name: &str) -> Result<&'a str, TokenAuthError> {
    match jar.get(cookie_name) {
        Some(cookie) if !cookie.value().is_empty() => Ok(cookie.value()),
        _ => Err(TokenAuthError::MissingToken),
    }
}

/// Where and for how long the refresh token cookie lives.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    pub cookie_name: String,
    pub ttl_in_seconds: i64,
    pub domain: Option<String>,
}

impl SessionCookieConfig {
    pub fn new(ttl_in_seconds: i64, domain: Option<String>) -> Self {
        Self {
            cookie_name: REFRESH_COOKIE_NAME.to_string(),
            ttl_in_seconds,
            domain,
        }
    }

    /// Cookie carrying `token`, valid for the configured TTL.
    pub fn create_refresh_cookie(&self, token: String) -> Result<Cookie<'static>, TokenAuthError> {
        let cookie = self.base_cookie(token);
        // Max-Age is appended as a cookie attribute and parsed back in.
        Cookie::parse(format!("{cookie}; Max-Age={}", self.ttl_in_seconds))
            .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))
    }

    pub fn create_removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    fn base_cookie(&self, token: String) -> Cookie<'static> {
        let mut builder = Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }
}
