use authkeep_core::{
    AccessClaims, Email, RefreshClaims, ResetClaims, Role, SessionTokens, TokenClaims, TokenError,
    TokenKind, TokenService, User, UserId, Username,
};
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 7 * 60;
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
pub const RESET_TOKEN_TTL_SECONDS: i64 = 5 * 60;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub access_ttl_in_seconds: i64,
    pub refresh_ttl_in_seconds: i64,
    pub reset_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            access_ttl_in_seconds: ACCESS_TOKEN_TTL_SECONDS,
            refresh_ttl_in_seconds: REFRESH_TOKEN_TTL_SECONDS,
            reset_ttl_in_seconds: RESET_TOKEN_TTL_SECONDS,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 tokens signed with one shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtAuthConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }

    fn expiry(ttl_in_seconds: i64) -> Result<i64, TokenError> {
        let delta = chrono::Duration::try_seconds(ttl_in_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        Ok(Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp())
    }

    fn sign(&self, claims: &WireClaims) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<WireClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<WireClaims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue_session_pair(&self, user: &User) -> Result<SessionTokens, TokenError> {
        let now = Utc::now().timestamp();

        let access = WireClaims {
            kind: TokenKind::Access,
            sub: Some(user.id().to_string()),
            email: Some(user.email().as_ref().expose_secret().clone()),
            username: Some(user.username().as_str().to_owned()),
            role: Some(user.role()),
            iat: now,
            exp: Self::expiry(self.config.access_ttl_in_seconds)?,
            jti: Uuid::new_v4().to_string(),
        };
        let refresh = WireClaims {
            kind: TokenKind::Refresh,
            sub: Some(user.id().to_string()),
            email: None,
            username: None,
            role: None,
            iat: now,
            exp: Self::expiry(self.config.refresh_ttl_in_seconds)?,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(SessionTokens {
            access_token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
        })
    }

    fn issue_reset_token(&self, email: &Email) -> Result<String, TokenError> {
        let reset = WireClaims {
            kind: TokenKind::Reset,
            sub: None,
            email: Some(email.as_ref().expose_secret().clone()),
            username: None,
            role: None,
            iat: Utc::now().timestamp(),
            exp: Self::expiry(self.config.reset_ttl_in_seconds)?,
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&reset)
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token)?;
        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                found: claims.kind,
            });
        }
        claims.into_domain()
    }
}

/// Claim set as it travels inside the token. Which optional fields are present
/// depends on `kind`.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    iat: i64,
    exp: i64,
    jti: String,
}

impl WireClaims {
    fn into_domain(self) -> Result<TokenClaims, TokenError> {
        let user_id = |sub: Option<String>| -> Result<UserId, TokenError> {
            let sub = sub.ok_or(TokenError::Invalid)?;
            UserId::parse(&sub).map_err(|_| TokenError::Invalid)
        };
        let email = |email: Option<String>| -> Result<Email, TokenError> {
            let email = email.ok_or(TokenError::Invalid)?;
            Email::try_from(Secret::new(email)).map_err(|_| TokenError::Invalid)
        };

        match self.kind {
            TokenKind::Access => {
                let username = self.username.ok_or(TokenError::Invalid)?;
                Ok(TokenClaims::Access(AccessClaims {
                    user_id: user_id(self.sub)?,
                    email: email(self.email)?,
                    username: Username::parse(username).map_err(|_| TokenError::Invalid)?,
                    role: self.role.ok_or(TokenError::Invalid)?,
                    expires_at: self.exp,
                }))
            }
            TokenKind::Refresh => Ok(TokenClaims::Refresh(RefreshClaims {
                user_id: user_id(self.sub)?,
                expires_at: self.exp,
            })),
            TokenKind::Reset => Ok(TokenClaims::Reset(ResetClaims {
                email: email(self.email)?,
                token_id: self.jti,
                expires_at: self.exp,
            })),
        }
    }
}
