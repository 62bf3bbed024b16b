pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    otp::{OtpCode, OtpError, OtpRecord},
    pagination::{Pagination, UserPage},
    password::Password,
    role::Role,
    token::{AccessClaims, RefreshClaims, ResetClaims, SessionTokens, TokenClaims, TokenKind},
    user::{NewUser, User, UserError, UserProfile},
    user_id::UserId,
    username::Username,
};

pub use ports::{
    repositories::{OtpStore, OtpStoreError, UserStore, UserStoreError},
    services::{
        CredentialHasher, EmailClient, EmailClientError, HasherError, TokenError, TokenService,
    },
};

pub use strategies::auth_validator::AuthValidator;
