pub mod auth_validation;
pub mod config;
pub mod credentials;
pub mod email;
pub mod persistence;

pub use auth_validation::{
    AccessTokenValidator, JwtAuthConfig, JwtTokenService, ResetTokenValidator,
    SessionCookieConfig, TokenAuthError,
};
pub use credentials::Argon2Hasher;
pub use email::{MockEmailClient, PostmarkEmailClient, SentEmail};
pub use persistence::{HashMapOtpStore, HashMapUserStore, PostgresUserStore, RedisOtpStore};
